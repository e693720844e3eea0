mod support;

use actix_web::test;
use serde_json::json;
use storefront::repos::users::ROLE_ADMIN;
use storefront::Role;
use support::{
    assert_fail, assert_success, bearer, build_test_state, call_envelope, create_test_app,
    seed_user, token_for,
};

async fn admin_token(state: &storefront::AppState) -> String {
    let admin = seed_user(state, "boss", "pw", ROLE_ADMIN).await;
    token_for(admin.id, &admin.username, Role::Admin)
}

#[actix_web::test]
async fn create_list_edit_delete_product() {
    let state = build_test_state().await.expect("state");
    let token = admin_token(&state).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/product/create-product")
        .insert_header(bearer(&token))
        .set_json(json!({
            "id": 77,
            "item": "linen shirt",
            "price": 50.0,
            "stock": 10,
            "pictures": ["front.jpg", "back.jpg"],
            "m": {"chest": 100.0, "waist": 90.0, "hip": 100.0}
        }))
        .to_request();
    let body = call_envelope(&app, req).await;
    assert_success(&body);
    assert_eq!(body["message"], "linen shirt is inserted successfully");
    let id = body["details"]["id"].as_i64().expect("id");
    assert_ne!(id, 77, "client-supplied id must be ignored");
    assert_eq!(body["details"]["m"]["waist"], 90.0);
    assert!(body["details"]["xs"].is_null());

    // listing is public
    let req = test::TestRequest::get()
        .uri("/product/list-products")
        .to_request();
    let body = call_envelope(&app, req).await;
    assert_success(&body);
    let listed = body["details"].as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["pictures"], json!(["front.jpg", "back.jpg"]));

    // zero price is "unchanged", stock is replaced
    let req = test::TestRequest::patch()
        .uri("/product/edit-product")
        .insert_header(bearer(&token))
        .set_json(json!({"id": id, "price": 0.0, "stock": 20}))
        .to_request();
    let body = call_envelope(&app, req).await;
    assert_success(&body);
    assert_eq!(body["details"]["price"], 50.0);
    assert_eq!(body["details"]["stock"], 20);
    assert_eq!(body["details"]["item"], "linen shirt");
    assert_eq!(body["details"]["m"]["chest"], 100.0);

    let req = test::TestRequest::delete()
        .uri(&format!("/product/delete-product?id={id}"))
        .insert_header(bearer(&token))
        .to_request();
    let body = call_envelope(&app, req).await;
    assert_success(&body);
    assert_eq!(body["message"], "linen shirt is deleted successfully");

    let req = test::TestRequest::get()
        .uri("/product/list-products")
        .to_request();
    let body = call_envelope(&app, req).await;
    assert_eq!(body["details"], json!([]));
}

#[actix_web::test]
async fn create_requires_item_and_price() {
    let state = build_test_state().await.expect("state");
    let token = admin_token(&state).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/product/create-product")
        .insert_header(bearer(&token))
        .set_json(json!({"item": "no price"}))
        .to_request();

    assert_fail(
        &call_envelope(&app, req).await,
        "item name or price cannot be empty",
    );
}

#[actix_web::test]
async fn delete_product_id_param_errors() {
    let state = build_test_state().await.expect("state");
    let token = admin_token(&state).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::delete()
        .uri("/product/delete-product?id=")
        .insert_header(bearer(&token))
        .to_request();
    assert_fail(&call_envelope(&app, req).await, "Url param key not exist");

    let req = test::TestRequest::delete()
        .uri("/product/delete-product?id=abc")
        .insert_header(bearer(&token))
        .to_request();
    assert_fail(&call_envelope(&app, req).await, "invalid id: abc");
}

#[actix_web::test]
async fn edit_missing_product_fails_without_creating_it() {
    let state = build_test_state().await.expect("state");
    let token = admin_token(&state).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::patch()
        .uri("/product/edit-product")
        .insert_header(bearer(&token))
        .set_json(json!({"id": 12345, "item": "phantom", "price": 1.0}))
        .to_request();
    assert_eq!(call_envelope(&app, req).await["status"], "FAIL");

    let req = test::TestRequest::get()
        .uri("/product/list-products")
        .to_request();
    assert_eq!(call_envelope(&app, req).await["details"], json!([]));
}
