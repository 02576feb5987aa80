use backoffice::boot::boot;

#[tokio::main]
async fn main() {
    boot().await;
}
