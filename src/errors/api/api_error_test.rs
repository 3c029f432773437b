#[cfg(test)]
mod tests {
    use crate::errors::ApiError;
    use crate::errors::internal::{
        ImportError, InternalError, JWTValidationError, RemoteError, SettingsError, SppgError,
    };
    use crate::types::internal::AccessDecision;
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_hides_details() {
        let internal_err = InternalError::database("find_sppg", DbErr::Custom("disk on fire".to_string()));
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 500);
        assert_eq!(api_err.message(), "An internal error occurred");
    }

    #[test]
    fn test_record_not_found_maps_to_404() {
        let internal_err = InternalError::Sppg(SppgError::RecordNotFound("ABCDEFGH".to_string()));
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 404);
        assert!(api_err.message().contains("ABCDEFGH"));
    }

    #[test]
    fn test_duplicate_id_maps_to_conflict() {
        let internal_err = InternalError::Sppg(SppgError::DuplicateId("ABCDEFGH".to_string()));
        assert!(matches!(ApiError::from_internal_error(internal_err), ApiError::Conflict(_)));
    }

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        for err in [
            SppgError::UnknownStatus("DONE".to_string()),
            SppgError::InvalidId("abc".to_string()),
            SppgError::MissingName,
            SppgError::EmptyUpdate,
        ] {
            let api_err = ApiError::from_internal_error(InternalError::Sppg(err));
            assert_eq!(api_err.status_code(), 400);
        }
    }

    #[test]
    fn test_import_errors() {
        let api_err = ApiError::from_internal_error(InternalError::Import(ImportError::MissingColumn(
            "nama_sppg".to_string(),
        )));
        assert_eq!(api_err.status_code(), 400);

        let api_err = ApiError::from_internal_error(InternalError::Import(ImportError::Write("io".to_string())));
        assert_eq!(api_err.status_code(), 500);
    }

    #[test]
    fn test_setting_not_found_maps_to_404() {
        let api_err = ApiError::from_internal_error(InternalError::Settings(SettingsError::SettingNotFound(
            "42".to_string(),
        )));
        assert_eq!(api_err.status_code(), 404);
    }

    #[test]
    fn test_remote_errors_map_to_bad_gateway() {
        let api_err = ApiError::from_internal_error(InternalError::Remote(RemoteError::Network {
            url: "http://regions".to_string(),
            message: "refused".to_string(),
        }));
        assert_eq!(api_err.status_code(), 502);
    }

    #[test]
    fn test_jwt_errors_map_to_unauthorized() {
        let api_err = ApiError::from_internal_error(InternalError::JWTValidation(JWTValidationError::Expired));
        assert_eq!(api_err.status_code(), 401);
    }

    #[test]
    fn test_denials_have_distinct_statuses() {
        let unavailable = ApiError::from_decision(AccessDecision::PageUnavailable).unwrap();
        let denied = ApiError::from_decision(AccessDecision::AccessDenied).unwrap();
        let login = ApiError::from_decision(AccessDecision::RedirectToLogin).unwrap();

        assert_eq!(unavailable.status_code(), 503);
        assert!(unavailable.message().starts_with("Halaman Tidak Tersedia"));
        assert_eq!(denied.status_code(), 403);
        assert!(denied.message().starts_with("Akses Ditolak"));
        assert_eq!(login.status_code(), 401);
        assert!(ApiError::from_decision(AccessDecision::Granted).is_none());
    }
}
