pub mod bad_words;
pub mod mock_users;
pub mod password;
