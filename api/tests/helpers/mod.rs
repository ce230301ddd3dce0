pub mod app;

pub use app::{
    TEST_PASSWORD, create_user, get, get_json_body, make_test_app, post_empty, post_json,
    token_for,
};
