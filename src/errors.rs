use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::{Display, Error};

#[derive(Debug, Display, Error, serde::Deserialize, serde::Serialize)]
pub enum ApiError {
    #[display(fmt = "internal error")]
    InternalError,

    #[display(fmt = "{}: {}", field, message)]
    #[error(ignore)]
    ValidationError {
        field: String,
        message: String
    },

    #[display(fmt = "not found")]
    NotFound,

    #[display(fmt = "invalid state transition")]
    InvalidStateTransition,

    #[display(fmt = "authentication error")]
    AuthError,

    #[display(fmt = "token decoding error")]
    DecodeError,

    #[display(fmt = "token expired")]
    TokenExpirationError,

    #[display(fmt = "unauthorized")]
    Unauthorized
}

impl ApiError {
    pub fn validation(field: &str, message: &str) -> Self {
        ApiError::ValidationError {
            field: field.to_string(),
            message: message.to_string()
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            other => {
                log::error!("database error: {:?}", other);
                ApiError::InternalError
            }
        }
    }
}

impl error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(serde_json::json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidStateTransition => StatusCode::CONFLICT,
            ApiError::AuthError => StatusCode::UNAUTHORIZED,
            ApiError::DecodeError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::TokenExpirationError => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::ResponseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidStateTransition.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::validation("phone", "required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[actix_rt::test]
    async fn test_validation_error_body_names_the_field() {
        let resp = ApiError::validation("phone", "Phone number is required when sharing phone publicly.")
            .error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("phone:"));
    }
}
