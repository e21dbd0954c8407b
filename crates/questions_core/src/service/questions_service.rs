//! Query-layer facade over the four entity repositories.
//!
//! # Responsibility
//! - Expose every finder operation from one caller-facing handle.
//! - Provide entity navigation helpers (a user's questions, a question's
//!   followers) on top of the id-based finders.
//!
//! # Invariants
//! - Service APIs never bypass repository contracts.
//! - All repositories share the connection handed to `for_connection`.

use crate::model::question::{Question, QuestionId};
use crate::model::question_follow::QuestionFollow;
use crate::model::reply::{Reply, ReplyId};
use crate::model::user::{User, UserId};
use crate::repo::follow_repo::{QuestionFollowRepository, SqliteQuestionFollowRepository};
use crate::repo::question_repo::{QuestionRepository, SqliteQuestionRepository};
use crate::repo::reply_repo::{ReplyRepository, SqliteReplyRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoResult;
use rusqlite::Connection;

/// Service wired to the SQLite repositories of one connection.
pub type SqliteQuestionsService<'conn> = QuestionsService<
    SqliteUserRepository<'conn>,
    SqliteQuestionRepository<'conn>,
    SqliteReplyRepository<'conn>,
    SqliteQuestionFollowRepository<'conn>,
>;

/// Read-only query service.
pub struct QuestionsService<U, Q, R, F> {
    users: U,
    questions: Q,
    replies: R,
    follows: F,
}

impl<'conn> SqliteQuestionsService<'conn> {
    /// Builds the service from a ready connection.
    ///
    /// Fails with `RepoError::MissingRequiredTable` (or `MissingRequiredColumn`)
    /// when the connection lacks part of the schema.
    pub fn for_connection(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteUserRepository::try_new(conn)?,
            SqliteQuestionRepository::try_new(conn)?,
            SqliteReplyRepository::try_new(conn)?,
            SqliteQuestionFollowRepository::try_new(conn)?,
        ))
    }
}

impl<U, Q, R, F> QuestionsService<U, Q, R, F>
where
    U: UserRepository,
    Q: QuestionRepository,
    R: ReplyRepository,
    F: QuestionFollowRepository,
{
    /// Creates a service from explicit repository implementations.
    pub fn new(users: U, questions: Q, replies: R, follows: F) -> Self {
        Self {
            users,
            questions,
            replies,
            follows,
        }
    }

    pub fn list_all_users(&self) -> RepoResult<Vec<User>> {
        self.users.list_all_users()
    }

    pub fn find_user_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.users.find_user_by_id(id)
    }

    /// Returns `None` when no user carries exactly this first and last name.
    pub fn find_user_by_name(&self, fname: &str, lname: &str) -> RepoResult<Option<User>> {
        self.users.find_user_by_name(fname, lname)
    }

    pub fn list_all_questions(&self) -> RepoResult<Vec<Question>> {
        self.questions.list_all_questions()
    }

    pub fn find_question_by_id(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        self.questions.find_question_by_id(id)
    }

    pub fn find_questions_by_author(&self, user_id: UserId) -> RepoResult<Vec<Question>> {
        self.questions.find_questions_by_author(user_id)
    }

    pub fn list_all_replies(&self) -> RepoResult<Vec<Reply>> {
        self.replies.list_all_replies()
    }

    pub fn find_reply_by_id(&self, id: ReplyId) -> RepoResult<Option<Reply>> {
        self.replies.find_reply_by_id(id)
    }

    pub fn find_replies_by_user(&self, user_id: UserId) -> RepoResult<Vec<Reply>> {
        self.replies.find_replies_by_user(user_id)
    }

    pub fn find_replies_by_question(&self, question_id: QuestionId) -> RepoResult<Vec<Reply>> {
        self.replies.find_replies_by_question(question_id)
    }

    pub fn find_child_replies(&self, parent_reply_id: ReplyId) -> RepoResult<Vec<Reply>> {
        self.replies.find_child_replies(parent_reply_id)
    }

    pub fn list_all_follows(&self) -> RepoResult<Vec<QuestionFollow>> {
        self.follows.list_all_follows()
    }

    pub fn find_followers_of_question(&self, question_id: QuestionId) -> RepoResult<Vec<User>> {
        self.follows.find_followers_of_question(question_id)
    }

    pub fn find_questions_followed_by_user(&self, user_id: UserId) -> RepoResult<Vec<Question>> {
        self.follows.find_questions_followed_by_user(user_id)
    }

    /// Returns at most `n` questions, highest follow count first.
    pub fn find_most_followed_questions(&self, n: u32) -> RepoResult<Vec<Question>> {
        self.follows.find_most_followed_questions(n)
    }

    /// Questions written by `user`.
    pub fn authored_questions(&self, user: &User) -> RepoResult<Vec<Question>> {
        self.find_questions_by_author(user.id)
    }

    /// Questions `user` follows, one entry per follow row.
    pub fn followed_questions(&self, user: &User) -> RepoResult<Vec<Question>> {
        self.find_questions_followed_by_user(user.id)
    }

    /// Users following `question`, one entry per follow row.
    pub fn followers(&self, question: &Question) -> RepoResult<Vec<User>> {
        self.find_followers_of_question(question.id)
    }

    /// Replies posted under `question`.
    pub fn replies(&self, question: &Question) -> RepoResult<Vec<Reply>> {
        self.find_replies_by_question(question.id)
    }
}

#[cfg(test)]
mod tests {
    use super::QuestionsService;
    use crate::model::question::{Question, QuestionId};
    use crate::model::question_follow::QuestionFollow;
    use crate::model::reply::{Reply, ReplyId};
    use crate::model::user::{User, UserId};
    use crate::repo::follow_repo::QuestionFollowRepository;
    use crate::repo::question_repo::QuestionRepository;
    use crate::repo::reply_repo::ReplyRepository;
    use crate::repo::user_repo::UserRepository;
    use crate::repo::RepoResult;
    use std::cell::RefCell;

    /// Records which id each follow finder was asked about.
    #[derive(Default)]
    struct RecordingFollows {
        calls: RefCell<Vec<String>>,
    }

    impl QuestionFollowRepository for RecordingFollows {
        fn list_all_follows(&self) -> RepoResult<Vec<QuestionFollow>> {
            Ok(Vec::new())
        }

        fn find_followers_of_question(&self, question_id: QuestionId) -> RepoResult<Vec<User>> {
            self.calls
                .borrow_mut()
                .push(format!("followers:{question_id}"));
            Ok(Vec::new())
        }

        fn find_questions_followed_by_user(&self, user_id: UserId) -> RepoResult<Vec<Question>> {
            self.calls.borrow_mut().push(format!("followed:{user_id}"));
            Ok(Vec::new())
        }

        fn find_most_followed_questions(&self, n: u32) -> RepoResult<Vec<Question>> {
            self.calls.borrow_mut().push(format!("most:{n}"));
            Ok(Vec::new())
        }
    }

    struct NoUsers;

    impl UserRepository for NoUsers {
        fn list_all_users(&self) -> RepoResult<Vec<User>> {
            Ok(Vec::new())
        }

        fn find_user_by_id(&self, _id: UserId) -> RepoResult<Option<User>> {
            Ok(None)
        }

        fn find_user_by_name(&self, _fname: &str, _lname: &str) -> RepoResult<Option<User>> {
            Ok(None)
        }
    }

    struct NoQuestions;

    impl QuestionRepository for NoQuestions {
        fn list_all_questions(&self) -> RepoResult<Vec<Question>> {
            Ok(Vec::new())
        }

        fn find_question_by_id(&self, _id: QuestionId) -> RepoResult<Option<Question>> {
            Ok(None)
        }

        fn find_questions_by_author(&self, _user_id: UserId) -> RepoResult<Vec<Question>> {
            Ok(Vec::new())
        }
    }

    struct NoReplies;

    impl ReplyRepository for NoReplies {
        fn list_all_replies(&self) -> RepoResult<Vec<Reply>> {
            Ok(Vec::new())
        }

        fn find_reply_by_id(&self, _id: ReplyId) -> RepoResult<Option<Reply>> {
            Ok(None)
        }

        fn find_replies_by_user(&self, _user_id: UserId) -> RepoResult<Vec<Reply>> {
            Ok(Vec::new())
        }

        fn find_replies_by_question(&self, _question_id: QuestionId) -> RepoResult<Vec<Reply>> {
            Ok(Vec::new())
        }

        fn find_child_replies(&self, _parent_reply_id: ReplyId) -> RepoResult<Vec<Reply>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn navigation_helpers_delegate_with_entity_ids() {
        let service = QuestionsService::new(
            NoUsers,
            NoQuestions,
            NoReplies,
            RecordingFollows::default(),
        );
        let user = User {
            id: 7,
            fname: "Ada".to_string(),
            lname: "Lovelace".to_string(),
        };
        let question = Question {
            id: 3,
            title: "t".to_string(),
            body: "b".to_string(),
            user_id: 7,
        };

        service.followers(&question).unwrap();
        service.followed_questions(&user).unwrap();
        service.find_most_followed_questions(4).unwrap();

        assert_eq!(
            *service.follows.calls.borrow(),
            vec!["followers:3", "followed:7", "most:4"]
        );
    }
}
