use crate::api::{decode_list, ListQuery};
use crate::commands::records::forget_cached;
use crate::commands::{CommandContext, CommandResult, ResourceKind, Toggle};
use crate::models::{Program, Resource};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Pong {
    api_url: String,
    millis: u128,
}

/// Simple ping command to check if the API is responsive
pub async fn ping(ctx: &CommandContext) -> CommandResult {
    let api_url = ctx.config.read().await.api_url.clone();
    let path = ListQuery::new().limit(1).to_path(Program::PATH);

    let started = Instant::now();
    let value = ctx.transport.request(Method::GET, &path, None).await?;
    // The answer must still be a list we understand
    decode_list::<Value>(value, Program::COLLECTION, 1)?;
    let pong = Pong {
        api_url,
        millis: started.elapsed().as_millis(),
    };

    ctx.render(&pong, |pong| {
        let millis = pong.millis.to_string();
        t!("ping.response", url = pong.api_url.as_str(), millis = millis.as_str()).to_string()
    })
}

/// Switch the offline cache of a collection on or off
pub async fn cache(ctx: &CommandContext, resource: ResourceKind, toggle: Toggle) -> CommandResult {
    let collection = resource.collection();
    let enabled = toggle == Toggle::On;
    {
        let mut config = ctx.config.write().await;
        config.set_cached(collection, enabled)?;
    }
    if !enabled {
        forget_cached(ctx, resource).await?;
    }
    info!("Offline cache for {} set to {}", collection, enabled);

    let message = if enabled {
        t!("cache.enabled", collection = collection)
    } else {
        t!("cache.disabled", collection = collection)
    }
    .to_string();
    ctx.render(&message, |message| message.clone())
}
