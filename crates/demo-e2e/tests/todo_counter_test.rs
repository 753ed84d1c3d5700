// TodoMVC - "N items left" counter

mod common;

use common::TODO_ITEMS;
use demo_e2e::expect;
use demo_e2e::pages::TodoApp;

#[tokio::test]
async fn test_display_current_item_count() -> anyhow::Result<()> {
    common::todo_scenario(
        "should display the current number of todo items",
        async |todo: &TodoApp| {
            todo.add_todo(TODO_ITEMS[0]).await?;
            expect(todo.todo_count().await).to_contain_text("1").await?;

            todo.add_todo(TODO_ITEMS[1]).await?;
            expect(todo.todo_count().await).to_contain_text("2").await?;

            todo.wait_for_todo_count(2).await
        },
    )
    .await?;
    Ok(())
}
