use kmeans_replay::*;

fn main() {
    let k = 4;

    // Generate the demonstration data: 300 points around four blob centers
    let rows = demo::demo_points(&mut rand::thread_rng()).unwrap();
    let points = PointSet::from_rows(&rows).unwrap();

    // Calculate kmeans, using kmean++ as initialization-method
    let engine = ClusteringEngine::new(points, k, InitMethod::KMeansPlusPlus, KMeansConfig::default()).unwrap();
    let history = engine.run().unwrap();

    println!("Snapshots: {}", history.len());
    println!("Centroids: {:?}", history.final_centers().unwrap());
    println!("Cluster-Assignments: {:?}", history.final_assignments().unwrap());
}
