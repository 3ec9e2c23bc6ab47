use kmeans_replay::*;
use rand::prelude::*;

fn main() {
    let mut rnd = StdRng::seed_from_u64(1337);
    let rows = demo::demo_points(&mut rnd).unwrap();

    let conf = KMeansConfig::build()
        .random_generator(rnd)
        .init_done(&|s| println!("Initialization completed: {:?}", s.centroids()))
        .iteration_done(&|s, nr, moved|
            println!("Iteration {} - Error: {:.2} | Centers moved: {}", nr, s.distsum(), moved))
        .build();

    // Farthest-point initialization is deterministic, the generator only matters for random / kmeans++
    let engine = ClusteringEngine::new(PointSet::from_rows(&rows).unwrap(), 4, InitMethod::Farthest, conf).unwrap();
    let history = engine.run().unwrap();

    for (step, (centers, assignments)) in history.iter().enumerate() {
        let assigned = assignments.iter().filter(|a| a.is_some()).count();
        println!("Step {}: {} points assigned, centers {:?}", step, assigned, centers);
    }
}
