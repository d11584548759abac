//! Declarative field validation for every submitted form. Each form is a
//! plain deserializable struct; `validate()` either passes or yields a
//! field name to ordered error messages mapping that the error response
//! echoes back to the client.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(
        min = 4,
        max = 25,
        message = "Username must be between 4 and 25 characters."
    ))]
    pub username: String,
    #[validate(
        length(min = 6, max = 120, message = "Email must be between 6 and 120 characters."),
        email(message = "Invalid email address.")
    )]
    pub email: String,
    #[validate(
        length(min = 4, max = 20, message = "Password must be between 4 and 20 characters."),
        must_match(other = "confirm", message = "Passwords must match")
    )]
    pub password: String,
    pub confirm: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotForm {
    #[validate(
        length(min = 6, max = 120, message = "Email must be between 6 and 120 characters."),
        email(message = "Invalid email address.")
    )]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BlogForm {
    #[validate(length(
        min = 4,
        max = 25,
        message = "Title must be between 4 and 25 characters."
    ))]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required."))]
    pub body: String,
    // Unchecked checkbox: the field is simply absent from the submission.
    #[serde(default)]
    pub public: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Comment text is required."))]
    pub text: String,
}
