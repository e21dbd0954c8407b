use questions_core::{Question, QuestionFollow, Reply, User};
use serde_json::json;

#[test]
fn user_serializes_with_column_names() {
    let user = User {
        id: 1,
        fname: "Ada".to_string(),
        lname: "Lovelace".to_string(),
    };

    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value, json!({ "id": 1, "fname": "Ada", "lname": "Lovelace" }));
    assert_eq!(user.full_name(), "Ada Lovelace");
}

#[test]
fn question_roundtrips_through_json() {
    let question = Question {
        id: 3,
        title: "Borrowing".to_string(),
        body: "Why can't I move out of a reference?".to_string(),
        user_id: 1,
    };

    let text = serde_json::to_string(&question).unwrap();
    let parsed: Question = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, question);
}

#[test]
fn top_level_reply_serializes_null_parent() {
    let reply = Reply {
        id: 10,
        question_id: 3,
        parent_reply_id: None,
        user_id: 2,
        body: "Clone it.".to_string(),
    };

    let value = serde_json::to_value(&reply).unwrap();
    assert!(value["parent_reply_id"].is_null());
    assert_eq!(value["question_id"], 3);
}

#[test]
fn question_follow_deserializes_from_row_shaped_json() {
    let follow: QuestionFollow =
        serde_json::from_value(json!({ "id": 5, "user_id": 2, "question_id": 3 })).unwrap();
    assert_eq!(
        follow,
        QuestionFollow {
            id: 5,
            user_id: 2,
            question_id: 3,
        }
    );
}
