use kmeans_replay::protocol::run_json;
use kmeans_replay::KMeansConfig;

fn main() {
    let request = r#"{
        "data": [[0, 0], [0, 1], [10, 0], [10, 1]],
        "k": 2,
        "initMethod": "manual",
        "selectedPoints": [[0, 0], [10, 0]]
    }"#;

    match run_json(request, KMeansConfig::default()) {
        Ok(response) => println!("{}", response),
        Err(e) => eprintln!("Request failed: {}", e),
    }
}
