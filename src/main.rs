#[tokio::main]
async fn main() {
  if let Err(e) = workout_log::run().await {
    tracing::error!(error = %e, "workout-log failed");
    eprintln!("workout-log: {}", e);
    std::process::exit(1);
  }
}
