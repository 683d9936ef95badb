pub async fn liveness() -> &'static str {
    "school-service is running"
}
