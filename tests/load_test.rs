//! Load testing for the SOAP middleware.

use std::time::{Duration, Instant};

mod common;

use common::ENDPOINT;

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    // 1. Mock upstream echoing the request index
    let (upstream, captured) = common::start_programmable_upstream(|index, request| {
        common::MockReply::Respond(200, format!("<Echo n=\"{}\">{}</Echo>", index, request.body))
    })
    .await;

    // 2. Start middleware
    let (addr, shutdown) = common::start_middleware(common::middleware_config(upstream)).await;

    // 3. Run load
    let concurrency = 10;
    let requests_per_task = 20;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task_id in 0..concurrency {
        let client = client.clone();
        let url = format!("http://{}{}", addr, ENDPOINT);
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for i in 0..requests_per_task {
                let payload = format!("<Request>&lt;Tx id=\"{}-{}\"/&gt;</Request>", task_id, i);
                let expected = format!("<Tx id=\"{}-{}\"/>", task_id, i);
                let req_start = Instant::now();
                if let Ok(res) = client
                    .post(&url)
                    .header("Content-Type", "text/xml")
                    .body(payload)
                    .send()
                    .await
                {
                    if res.status().is_success() {
                        let body = res.text().await.unwrap_or_default();
                        assert!(body.contains(&expected), "response crossed requests: {}", body);
                        latencies.push(req_start.elapsed());
                    }
                }
            }
            latencies
        }));
    }

    let mut all_latencies: Vec<Duration> = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }

    let duration = start.elapsed();
    assert_eq!(all_latencies.len(), total_requests, "every request should succeed");
    assert_eq!(captured.lock().unwrap().len(), total_requests, "one upstream call per request");

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

    shutdown.trigger();
}
