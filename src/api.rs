pub mod health_checks;
pub mod json_error;
pub mod reports;
pub mod validated_json;
