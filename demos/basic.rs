use yandex_cloud_client::resources::PageRequest;
use yandex_cloud_client::{Config, YandexCloudClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt().try_init();

    // Reads YANDEX_CLOUD_OAUTH_TOKEN and optional endpoint overrides
    let client = YandexCloudClient::new(Config::from_env()?)?;
    let page = PageRequest::default();

    let organizations = client.organizations().list(&page).await?;
    println!("organizations: {}", serde_json::to_string_pretty(&organizations)?);

    let organization_id = std::env::var("YANDEX_CLOUD_ORGANIZATION_ID")
        .ok()
        .or_else(|| first_id(&organizations, "organizations"));
    let Some(organization_id) = organization_id else {
        return Ok(());
    };

    let clouds = client
        .clouds()
        .list(Some(&organization_id), &page)
        .await?;
    println!("clouds: {}", serde_json::to_string_pretty(&clouds)?);

    let cloud_id = std::env::var("YANDEX_CLOUD_CLOUD_ID")
        .ok()
        .or_else(|| first_id(&clouds, "clouds"));
    if let Some(cloud_id) = cloud_id {
        let folders = client.folders().list(&cloud_id, &page).await?;
        println!("folders: {}", serde_json::to_string_pretty(&folders)?);
    }
    Ok(())
}

fn first_id(list: &serde_json::Map<String, serde_json::Value>, key: &str) -> Option<String> {
    list.get(key)?
        .as_array()?
        .first()?
        .get("id")?
        .as_str()
        .map(str::to_string)
}
