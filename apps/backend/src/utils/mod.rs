pub mod side_token;
