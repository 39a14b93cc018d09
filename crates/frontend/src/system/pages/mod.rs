pub mod landing;
pub mod signin;
pub mod signup;
pub mod verify_email;
