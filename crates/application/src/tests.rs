use crate::RecipeApp;
use domain::DomainError;

fn validation_fields(err: DomainError) -> Vec<String> {
    match err {
        DomainError::Validation(errors) => errors.0.into_iter().map(|e| e.field).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn tags_are_isolated_per_owner() {
    let app = RecipeApp::in_memory();
    app.tags.create_tag(1, "Vegan".into()).await.expect("create");

    let theirs = app.tags.list_tags(2).await.expect("list");
    assert!(theirs.is_empty());

    let mine = app.tags.list_tags(1).await.expect("list");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Vegan");
    assert_eq!(mine[0].id, Some(1));
}

#[tokio::test]
async fn tags_list_name_descending() {
    let app = RecipeApp::in_memory();
    app.tags.create_tag(1, "Dessert".into()).await.expect("create");
    app.tags.create_tag(1, "Vegan".into()).await.expect("create");
    app.tags.create_tag(1, "Breakfast".into()).await.expect("create");

    let names: Vec<String> = app
        .tags
        .list_tags(1)
        .await
        .expect("list")
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["Vegan", "Dessert", "Breakfast"]);
}

#[tokio::test]
async fn blank_tag_name_is_rejected_and_not_persisted() {
    let app = RecipeApp::in_memory();
    let err = app
        .tags
        .create_tag(1, "   ".into())
        .await
        .expect_err("blank name");
    assert_eq!(validation_fields(err), vec!["name"]);
    assert!(app.tags.list_tags(1).await.expect("list").is_empty());
}

#[tokio::test]
async fn ingredients_list_name_descending_and_isolated() {
    let app = RecipeApp::in_memory();
    app.ingredients
        .create_ingredient(1, "Salt".into())
        .await
        .expect("create");
    app.ingredients
        .create_ingredient(1, "Turmeric".into())
        .await
        .expect("create");
    app.ingredients
        .create_ingredient(2, "Sugar".into())
        .await
        .expect("create");

    let names: Vec<String> = app
        .ingredients
        .list_ingredients(1)
        .await
        .expect("list")
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Turmeric", "Salt"]);
}

#[tokio::test]
async fn recipes_list_id_descending() {
    let app = RecipeApp::in_memory();
    for title in ["Soup", "Stew", "Salad"] {
        app.recipes
            .create_recipe(1, title.into(), 10, 5.0, vec![], vec![])
            .await
            .expect("create");
    }

    let ids: Vec<Option<i32>> = app
        .recipes
        .list_recipes(1)
        .await
        .expect("list")
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![Some(3), Some(2), Some(1)]);
}

#[tokio::test]
async fn recipe_associates_exactly_the_given_ids() {
    let app = RecipeApp::in_memory();
    let cumin = app
        .ingredients
        .create_ingredient(1, "Cumin".into())
        .await
        .expect("create");
    let rice = app
        .ingredients
        .create_ingredient(1, "Rice".into())
        .await
        .expect("create");
    let vegan = app.tags.create_tag(1, "Vegan".into()).await.expect("create");

    let recipe = app
        .recipes
        .create_recipe(
            1,
            "Curry".into(),
            20,
            7.0,
            vec![vegan.id.expect("id")],
            vec![cumin.id.expect("id"), rice.id.expect("id")],
        )
        .await
        .expect("create recipe");

    assert_eq!(recipe.tags, vec![vegan.id.expect("id")]);
    assert_eq!(
        recipe.ingredients,
        vec![cumin.id.expect("id"), rice.id.expect("id")]
    );
}

#[tokio::test]
async fn duplicate_association_ids_collapse_to_a_set() {
    let app = RecipeApp::in_memory();
    let vegan = app.tags.create_tag(1, "Vegan".into()).await.expect("create");
    let id = vegan.id.expect("id");

    let recipe = app
        .recipes
        .create_recipe(1, "Curry".into(), 20, 7.0, vec![id, id, id], vec![])
        .await
        .expect("create recipe");
    assert_eq!(recipe.tags, vec![id]);
}

#[tokio::test]
async fn detail_form_expands_associations_to_objects() {
    let app = RecipeApp::in_memory();
    let cumin = app
        .ingredients
        .create_ingredient(1, "Cumin".into())
        .await
        .expect("create");
    let rice = app
        .ingredients
        .create_ingredient(1, "Rice".into())
        .await
        .expect("create");

    let recipe = app
        .recipes
        .create_recipe(
            1,
            "Curry".into(),
            20,
            7.0,
            vec![],
            vec![cumin.id.expect("id"), rice.id.expect("id")],
        )
        .await
        .expect("create recipe");

    let detail = app
        .recipes
        .get_recipe_detail(1, recipe.id.expect("id"))
        .await
        .expect("detail");

    let ids: Vec<Option<i32>> = detail.ingredients.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![cumin.id, rice.id]);
    let names: Vec<&str> = detail.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Cumin", "Rice"]);
    assert!(detail.tags.is_empty());
}

#[tokio::test]
async fn unknown_reference_ids_fail_validation() {
    let app = RecipeApp::in_memory();
    let err = app
        .recipes
        .create_recipe(1, "Curry".into(), 20, 7.0, vec![99], vec![42])
        .await
        .expect_err("unknown references");

    let fields = validation_fields(err);
    assert!(fields.contains(&"tags".to_string()));
    assert!(fields.contains(&"ingredients".to_string()));
    assert!(app.recipes.list_recipes(1).await.expect("list").is_empty());
}

#[tokio::test]
async fn another_users_tag_cannot_be_referenced() {
    let app = RecipeApp::in_memory();
    let foreign = app.tags.create_tag(2, "Vegan".into()).await.expect("create");

    let err = app
        .recipes
        .create_recipe(
            1,
            "Curry".into(),
            20,
            7.0,
            vec![foreign.id.expect("id")],
            vec![],
        )
        .await
        .expect_err("foreign tag id");
    assert_eq!(validation_fields(err), vec!["tags"]);
}

#[tokio::test]
async fn blank_title_and_negative_fields_are_all_reported() {
    let app = RecipeApp::in_memory();
    let err = app
        .recipes
        .create_recipe(1, " ".into(), -5, -1.0, vec![], vec![])
        .await
        .expect_err("invalid recipe");
    assert_eq!(validation_fields(err), vec!["title", "time_minutes", "price"]);
}

#[tokio::test]
async fn cross_user_recipe_lookup_is_not_found() {
    let app = RecipeApp::in_memory();
    let recipe = app
        .recipes
        .create_recipe(1, "Secret Sauce".into(), 5, 2.0, vec![], vec![])
        .await
        .expect("create");

    let err = app
        .recipes
        .get_recipe(2, recipe.id.expect("id"))
        .await
        .expect_err("foreign lookup");
    assert!(matches!(err, DomainError::RecipeNotFound(_)));
}

#[tokio::test]
async fn register_login_authenticate_flow() {
    let app = RecipeApp::in_memory();
    let user = app
        .users
        .register("a@x.com".into(), "testpass".into(), "A".into())
        .await
        .expect("register");

    let token = app.users.login("a@x.com", "testpass").await.expect("login");
    let authed = app.users.authenticate(&token.token).await.expect("auth");
    assert_eq!(authed.id, user.id);
    assert_eq!(authed.email, "a@x.com");
}
