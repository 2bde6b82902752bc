//! # Catalog Admin
//!
//! Command line counterpart of the admin products page.
//!
//! ## Repair Flow
//! 1. Fetch the category's products from the server.
//! 2. Recompute the counts locally with [`ordering`].
//! 3. Stop early when there is nothing to repair.
//! 4. Ask for confirmation, naming how many products will change.
//! 5. Send one batch request and report the server's count.
//! 6. Fetch again whether or not the request succeeded, and print fresh counts.
//!
//! Requests are sent one at a time, so two repairs from the same session never race.
use std::{io, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use ordering::{
    OrderingSummary, Product, plan_duplicate_repair, plan_missing_order_repair, summarize,
};
use reqwest::{Client, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub mod models;
pub mod utils;

use models::{
    AUTO_ORGANIZE, AutoOrganizeResponse, CategoryRequest, ErrorBody, FIX_DUPLICATES,
    FixDuplicatesResponse, PRODUCTS,
};
use utils::{
    confirm, fix_duplicates_prompt, format_duplicates, format_product, format_summary,
    organize_prompt,
};

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to read confirmation: {0}")]
    Io(#[from] io::Error),
}

pub struct Admin {
    client: Client,
    base_url: String,
}

impl Admin {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_products(&self, category_id: &str) -> Result<Vec<Product>, AdminError> {
        let response = self
            .client
            .get(format!("{}{PRODUCTS}", self.base_url))
            .query(&[("categoryId", category_id)])
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    pub async fn auto_organize(&self, category_id: &str) -> Result<AutoOrganizeResponse, AdminError> {
        self.post(AUTO_ORGANIZE, &CategoryRequest { category_id }).await
    }

    pub async fn fix_duplicates(&self, category_id: &str) -> Result<FixDuplicatesResponse, AdminError> {
        self.post(FIX_DUPLICATES, &CategoryRequest { category_id }).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, AdminError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }
}

async fn check(response: Response) -> Result<Response, AdminError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(AdminError::Api { status, message })
}

/// The server normalizes category keys; use the key it hands back.
fn resolved_category(products: &[Product], requested: &str) -> String {
    products
        .first()
        .map(|p| p.category_id.clone())
        .unwrap_or_else(|| requested.to_string())
}

async fn load(admin: &Admin, category_id: &str) -> Result<(Vec<Product>, OrderingSummary), AdminError> {
    let products = admin.fetch_products(category_id).await?;
    let category_id = resolved_category(&products, category_id);
    let summary = summarize(&products, &category_id);

    Ok((products, summary))
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn ask(prompt: &str, assume_yes: bool) -> Result<bool, AdminError> {
    if assume_yes {
        return Ok(true);
    }

    Ok(confirm(prompt, io::stdin().lock(), io::stdout())?)
}

pub async fn list(admin: &Admin, category_id: &str) -> Result<(), AdminError> {
    let (products, summary) = load(admin, category_id).await?;

    println!("{}\n", format_summary(&summary));
    for product in &products {
        println!("{}", format_product(product));
    }

    Ok(())
}

pub async fn status(admin: &Admin, category_id: &str) -> Result<(), AdminError> {
    let (products, summary) = load(admin, category_id).await?;

    println!("{}", format_summary(&summary));
    for line in format_duplicates(&products, &summary.category_id) {
        println!("  {line}");
    }

    Ok(())
}

pub async fn organize(admin: &Admin, category_id: &str, assume_yes: bool) -> Result<(), AdminError> {
    let (products, summary) = load(admin, category_id).await?;

    if !summary.can_auto_organize() {
        println!("Every product in {} already has an order. Nothing to do.", summary.category_id);
        return Ok(());
    }

    let plan = plan_missing_order_repair(&products, &summary.category_id);
    if !ask(&organize_prompt(&summary.category_id, &plan), assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let pb = spinner("Organizing...");
    let result = admin.auto_organize(&summary.category_id).await;
    pb.finish_and_clear();

    match &result {
        Ok(AutoOrganizeResponse {
            organized,
            start_order: Some(start),
            end_order: Some(end),
        }) => println!("Organized {organized} products, orders {start} to {end}."),
        Ok(response) => println!("Organized {} products.", response.organized),
        Err(e) => eprintln!("Auto-organize failed: {e}"),
    }

    settle(result, refresh(admin, &summary.category_id).await)
}

pub async fn fix_duplicates(admin: &Admin, category_id: &str, assume_yes: bool) -> Result<(), AdminError> {
    let (products, summary) = load(admin, category_id).await?;

    if !summary.can_fix_duplicates() {
        println!("Orders in {} are already unique. Nothing to do.", summary.category_id);
        return Ok(());
    }

    let plan = plan_duplicate_repair(&products, &summary.category_id);
    if !ask(&fix_duplicates_prompt(&summary, &plan), assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let pb = spinner("Fixing duplicates...");
    let result = admin.fix_duplicates(&summary.category_id).await;
    pb.finish_and_clear();

    match &result {
        Ok(response) => println!("Updated {} products.", response.updated),
        Err(e) => eprintln!("Fix duplicates failed: {e}"),
    }

    settle(result, refresh(admin, &summary.category_id).await)
}

/// The batch error is what the user needs to see; a failed re-read after it
/// is only printed.
fn settle<T>(batch: Result<T, AdminError>, refreshed: Result<(), AdminError>) -> Result<(), AdminError> {
    match (batch, refreshed) {
        (Err(e), Err(refresh_error)) => {
            eprintln!("Failed to reload products: {refresh_error}");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(_), refreshed) => refreshed,
    }
}

/// Re-reads the category after a write; the server's list is the only truth.
async fn refresh(admin: &Admin, category_id: &str) -> Result<(), AdminError> {
    let (_, summary) = load(admin, category_id).await?;
    println!("{}", format_summary(&summary));

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    #[test]
    fn test_resolved_category() {
        let products = vec![Product {
            id: "a".to_string(),
            category_id: "outdoor-benches".to_string(),
            display_order: None,
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        }];

        assert_eq!(resolved_category(&products, "Outdoor Benches"), "outdoor-benches");
        assert_eq!(resolved_category(&[], "planters"), "planters");
    }

    fn api_error(message: &str) -> AdminError {
        AdminError::Api {
            status: StatusCode::CONFLICT,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_batch_error_wins_over_reload_error() {
        let settled = settle::<()>(Err(api_error("batch")), Err(api_error("reload")));
        assert!(matches!(settled, Err(AdminError::Api { ref message, .. }) if message == "batch"));

        let settled = settle::<()>(Err(api_error("batch")), Ok(()));
        assert!(matches!(settled, Err(AdminError::Api { ref message, .. }) if message == "batch"));

        let settled = settle(Ok(()), Err(api_error("reload")));
        assert!(matches!(settled, Err(AdminError::Api { ref message, .. }) if message == "reload"));

        assert!(settle(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let admin = Admin::new("http://localhost:8080/");
        assert_eq!(admin.base_url, "http://localhost:8080");
    }
}
