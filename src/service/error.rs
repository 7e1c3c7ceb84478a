use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Ticket not found")]
    TicketNotFound(Uuid),

    #[error("Chat not found for this ticket")]
    ChatNotFoundForTicket(Uuid),

    #[error("Chat not found")]
    ChatNotFound(Uuid),

    #[error("Message not found")]
    MessageNotFound(Uuid),

    #[error("Unauthorized")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::TicketNotFound(_)
            | ServiceError::ChatNotFoundForTicket(_)
            | ServiceError::ChatNotFound(_)
            | ServiceError::MessageNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::Unauthenticated => HttpError::unauthorized(error.to_string()),

            ServiceError::Forbidden(_) => HttpError::forbidden(error.to_string()),

            ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::Database(e) => HttpError::from_db(e),
        }
    }
}

impl From<String> for ServiceError {
    fn from(err: String) -> Self {
        ServiceError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorMessage;
    use axum::http::StatusCode;

    #[test]
    fn maps_to_http_statuses() {
        let id = Uuid::new_v4();
        let cases = [
            (ServiceError::TicketNotFound(id), StatusCode::NOT_FOUND, "Ticket not found"),
            (
                ServiceError::ChatNotFoundForTicket(id),
                StatusCode::NOT_FOUND,
                "Chat not found for this ticket",
            ),
            (ServiceError::Unauthenticated, StatusCode::UNAUTHORIZED, "Unauthorized"),
            (
                ServiceError::Forbidden("You can only edit your own messages".to_string()),
                StatusCode::FORBIDDEN,
                "You can only edit your own messages",
            ),
            (
                ServiceError::Validation("Message is required".to_string()),
                StatusCode::BAD_REQUEST,
                "Message is required",
            ),
        ];

        for (error, status, message) in cases {
            let http: HttpError = error.into();
            assert_eq!(http.status, status);
            assert_eq!(http.message, message);
        }
    }

    #[test]
    fn database_errors_are_hidden() {
        let http: HttpError = ServiceError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(http.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(http.message, ErrorMessage::ServerError.to_string());
    }
}
