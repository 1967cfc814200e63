// Database schema for the recipe application
diesel::table! {
    users (id) {
        id -> Integer,
        email -> Text,             // Natural key, unique
        name -> Text,
        password_hash -> Text,     // Argon2 PHC string, never plaintext
        created_at -> Timestamp,
    }
}

diesel::table! {
    auth_tokens (id) {
        id -> Integer,
        user_id -> Integer,
        token -> Text,             // Opaque bearer token
        created_at -> Timestamp,
    }
}

diesel::table! {
    tags (id) {
        id -> Integer,
        user_id -> Integer,        // Owning user
        name -> Text,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Integer,
        user_id -> Integer,        // Owning user
        name -> Text,
    }
}

diesel::table! {
    recipes (id) {
        id -> Integer,
        user_id -> Integer,        // Owning user
        title -> Text,
        time_minutes -> Integer,
        price -> Double,
        created_at -> Timestamp,
    }
}

// Explicit association tables for the recipe many-to-many relations
diesel::table! {
    recipe_tags (id) {
        id -> Integer,
        recipe_id -> Integer,
        tag_id -> Integer,
    }
}

diesel::table! {
    recipe_ingredients (id) {
        id -> Integer,
        recipe_id -> Integer,
        ingredient_id -> Integer,
    }
}

diesel::joinable!(auth_tokens -> users (user_id));
diesel::joinable!(tags -> users (user_id));
diesel::joinable!(ingredients -> users (user_id));
diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    auth_tokens,
    tags,
    ingredients,
    recipes,
    recipe_tags,
    recipe_ingredients,
);
