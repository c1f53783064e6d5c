//! Concurrency: many in-flight requests, no cross-talk.

use std::time::{Duration, Instant};

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_no_cross_talk() {
    let upstream = common::start_mock_upstream().await;
    let gateway = common::start_gateway(common::gateway_config(upstream)).await;
    let client = common::client();

    let concurrency = 32;
    let start = Instant::now();

    let mut tasks = Vec::new();
    for i in 0..concurrency {
        let client = client.clone();
        // Later paths answer faster, so completion order differs from send order.
        let latency_ms = 50 + (concurrency - i) * 10;
        let url = gateway.url(&format!("/slow/{}/path-{}", latency_ms, i));
        tasks.push(tokio::spawn(async move {
            let res = client.get(&url).send().await.unwrap();
            (i, res.status(), res.text().await.unwrap())
        }));
    }

    for task in tasks {
        let (i, status, body) = task.await.unwrap();
        assert!(status.is_success(), "path-{} failed with {}", i, status);
        assert_eq!(body, format!("tag:path-{}", i));
    }

    // Sequential handling would take the sum of all latencies (~7s).
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_load_performance() {
    let upstream = common::start_mock_upstream().await;
    let gateway = common::start_gateway(common::gateway_config(upstream)).await;
    let client = common::client();

    let concurrency = 10;
    let requests_per_task = 20;
    let total_requests = concurrency * requests_per_task;
    let start = Instant::now();

    let mut tasks = Vec::new();
    for t in 0..concurrency {
        let client = client.clone();
        let url = gateway.url(&format!("/status/200?task={}", t));
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for _ in 0..requests_per_task {
                let req_start = Instant::now();
                if let Ok(res) = client.get(&url).send().await {
                    if res.status().is_success() {
                        latencies.push(req_start.elapsed());
                    }
                }
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }

    let duration = start.elapsed();
    assert_eq!(all_latencies.len(), total_requests, "every request should succeed");

    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", total_requests as f64 / duration.as_secs_f64());
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("-------------------------\n");
}
