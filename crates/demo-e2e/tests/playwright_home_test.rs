// Playwright documentation home page
//
// Tests cover:
// - Document title
// - "Get started" leads to the introduction

mod common;

use demo_e2e::pages::PlaywrightHomePage;
use demo_e2e::{PageObject, expect_page};

#[tokio::test]
async fn test_has_title() -> anyhow::Result<()> {
    common::run_scenario("has title", async |home: &PlaywrightHomePage| {
        expect_page(home.page()).to_have_title("Playwright").await
    })
    .await?;
    Ok(())
}

#[tokio::test]
async fn test_get_started_link() -> anyhow::Result<()> {
    common::run_scenario("get started link", async |home: &PlaywrightHomePage| {
        home.get_started().await?;

        expect_page(home.page()).to_have_url(".*intro").await
    })
    .await?;
    Ok(())
}
