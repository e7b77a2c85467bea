pub async fn public() -> &'static str {
    "This is a public endpoint - no authentication required!"
}
