use std::sync::Arc;

use voicecart::store::JsonFileStore;
use voicecart::tests::util::{sample_catalog, service_with};
use voicecart::{
    CatalogIndex, CommandError, CommandOptions, CommandService, Intent, Languages, ListManager,
    ListStore, Outcome, Product, ShoppingListItem, StoreError,
};

async fn json_service(path: std::path::PathBuf, products: Vec<Product>) -> CommandService {
    let lists = ListManager::load(ListStore::JsonFile(JsonFileStore::new(path))).await;
    CommandService::new(
        Arc::new(CatalogIndex::build(products)),
        Arc::new(Languages::builtin()),
        lists,
        CommandOptions::default(),
    )
}

#[tokio::test]
async fn add_then_remove_milk() {
    let service = service_with(
        vec![Product::new(["milk", "dairy milk"], "Dairy", 2.5)],
        CommandOptions::default(),
    )
    .await;

    let res = service.resolve_command("add 3 dairy milk", "en").await.unwrap();
    assert_eq!(res.outcome, Outcome::Applied);
    assert_eq!(res.intent, Intent::Add);
    assert_eq!(res.message, "Added 3 × milk to your list");
    assert_eq!(
        res.shopping_list,
        vec![ShoppingListItem {
            name: "milk".to_string(),
            quantity: 3,
            category: "Dairy".to_string(),
            price: 2.5,
        }]
    );
    assert!(res.search_results.is_empty());
    assert!(res.suggestions.is_empty());

    let res = service.resolve_command("remove milk", "en").await.unwrap();
    assert_eq!(res.outcome, Outcome::Applied);
    assert_eq!(res.message, "Removed milk from your list");
    assert_eq!(res.shopping_list.len(), 1);
    assert_eq!(res.shopping_list[0].quantity, 2);
}

#[tokio::test]
async fn repeated_adds_accumulate() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    service.resolve_command("add 2 eggs", "en").await.unwrap();
    let res = service.resolve_command("buy 3 egg", "en").await.unwrap();
    assert_eq!(res.shopping_list.len(), 1);
    assert_eq!(res.shopping_list[0].quantity, 5);
    assert_eq!(res.message, "Added 5 × eggs to your list");
}

#[tokio::test]
async fn add_then_remove_same_amount_empties_list() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    service.resolve_command("add 4 apples", "en").await.unwrap();
    let res = service.resolve_command("remove 4 apples", "en").await.unwrap();
    assert!(res.shopping_list.is_empty());
}

#[tokio::test]
async fn over_removal_deletes_entry() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    service.resolve_command("add 2 cheese", "en").await.unwrap();
    let res = service.resolve_command("remove 5 cheese", "en").await.unwrap();
    assert_eq!(res.outcome, Outcome::Applied);
    assert!(res.shopping_list.is_empty());
    assert!(service.lists().snapshot().await.is_empty());
}

#[tokio::test]
async fn removing_unlisted_item_is_not_found() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    let res = service.resolve_command("delete baguette", "en").await.unwrap();
    assert_eq!(res.outcome, Outcome::NotFound);
    assert_eq!(res.message, "bread not found in your list");
}

#[tokio::test]
async fn unknown_items_pass_through() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    let res = service.resolve_command("add 2 Xylophone", "en").await.unwrap();
    assert_eq!(res.outcome, Outcome::Applied);
    assert_eq!(res.shopping_list[0].name, "xylophone");
    assert_eq!(res.shopping_list[0].category, "Other");
    assert_eq!(res.shopping_list[0].price, 0.0);
}

#[tokio::test]
async fn unknown_intent_defaults_to_help() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    let res = service.resolve_command("milk", "en").await.unwrap();
    assert_eq!(res.outcome, Outcome::Unrecognized);
    assert_eq!(res.intent, Intent::Unknown);
    assert!(res.shopping_list.is_empty());
}

#[tokio::test]
async fn french_commands_use_french_messages() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    let res = service.resolve_command("Ajouter 2 fromage", "fr").await.unwrap();
    assert_eq!(res.message, "Ajouté 2 × cheese à votre liste");

    let res = service.resolve_command("supprimer pain", "fr-CA").await.unwrap();
    assert_eq!(res.outcome, Outcome::NotFound);
    assert_eq!(res.message, "bread introuvable dans votre liste");
}

#[tokio::test]
async fn unknown_language_uses_english() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    let res = service.resolve_command("add banana", "zz").await.unwrap();
    assert_eq!(res.message, "Added 1 × banana to your list");
}

#[tokio::test]
async fn search_filters_by_price() {
    let service = service_with(sample_catalog(), CommandOptions::default()).await;
    let res = service.resolve_command("search chicken", "en").await.unwrap();
    assert_eq!(res.outcome, Outcome::SearchResults);
    assert_eq!(res.search_results.len(), 1);

    let res = service
        .resolve_command("search chicken under 5", "en")
        .await
        .unwrap();
    assert!(res.search_results.is_empty());
    assert_eq!(res.message, "Found 0 items matching your search");
}

#[tokio::test]
async fn list_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoppinglist.json");

    let service = json_service(path.clone(), sample_catalog()).await;
    service.resolve_command("add 2 milk", "en").await.unwrap();
    service.resolve_command("add olive oil", "en").await.unwrap();
    drop(service);

    let service = json_service(path, sample_catalog()).await;
    let items = service.lists().snapshot().await;
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["milk", "olive oil"]);
    assert_eq!(items[0].quantity, 2);
}

#[tokio::test]
async fn corrupt_list_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoppinglist.json");
    std::fs::write(&path, "{ definitely not a list").unwrap();

    let service = json_service(path.clone(), sample_catalog()).await;
    assert!(service.lists().snapshot().await.is_empty());

    let res = service.resolve_command("add milk", "en").await.unwrap();
    assert_eq!(res.shopping_list.len(), 1);
    let stored: Vec<ShoppingListItem> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored, res.shopping_list);
}

#[tokio::test]
async fn write_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("shoppinglist.json");
    let service = json_service(path, sample_catalog()).await;

    let err = service
        .resolve_command("add milk", "en")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::Persistence(StoreError::Write(_))
    ));
    assert!(service.lists().snapshot().await.is_empty());

    // Reads never touch storage.
    let res = service.resolve_command("find milk", "en").await.unwrap();
    assert_eq!(res.outcome, Outcome::SearchResults);
}

#[tokio::test]
async fn concurrent_commands_are_serialized() {
    let service = Arc::new(service_with(sample_catalog(), CommandOptions::default()).await);
    let mut tasks = Vec::new();
    for i in 0..16 {
        let service = Arc::clone(&service);
        tasks.push(tokio::spawn(async move {
            let command = if i % 4 == 3 { "remove bread" } else { "add 2 bread" };
            service.resolve_command(command, "en").await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
    // Removes can run before any add, so only bound the result.
    let items = service.lists().snapshot().await;
    assert_eq!(items.len(), 1);
    assert!(items[0].quantity >= 20 && items[0].quantity <= 24);
}
