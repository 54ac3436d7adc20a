//! Values used when a setting is absent or empty.
//!
//! `server_address`, `datasource.username` and `datasource.password` have no
//! default and therefore no constant here.

use crate::domain::values::{ETagSupport, Encoding, FhirVersion};

pub const DEFAULT_PRETTY_PRINT: bool = true;
pub const MAX_PAGE_SIZE: i32 = 200;
pub const MAX_FETCH_SIZE: i32 = i32::MAX;
pub const DEFAULT_PAGE_SIZE: i32 = 20;
pub const LOGGER_NAME: &str = "fhirtest.access";
pub const LOGGER_FORMAT: &str = "Path[${servletPath}] Source[${requestHeader.x-forwarded-for}] \
Operation[${operationType} ${operationName} ${idOrResourceName}] UA[${requestHeader.user-agent}] \
Params[${requestParameters}] ResponseEncoding[${responseEncodingNoDefault}]";
pub const LOGGER_LOG_EXCEPTIONS: bool = true;
pub const LOGGER_ERROR_FORMAT: &str = "ERROR - ${requestVerb} ${requestUrl}";
pub const ALLOW_EXTERNAL_REFERENCES: bool = true;
pub const ALLOW_MULTIPLE_DELETE: bool = true;
pub const EXPUNGE_ENABLED: bool = true;
pub const DATASOURCE_DRIVER: &str = "org.apache.derby.jdbc.EmbeddedDriver";
pub const DATASOURCE_URL: &str = "jdbc:derby:directory:target/jpaserver_derby_files;create=true";
pub const DATASOURCE_MAX_POOL_SIZE: i32 = 10;
pub const PERSISTENCE_UNIT_NAME: &str = "HAPI_PU";
pub const FHIR_VERSION: FhirVersion = FhirVersion::Dstu3;
pub const ETAG_SUPPORT: ETagSupport = ETagSupport::Enabled;
pub const DEFAULT_ENCODING: Encoding = Encoding::Json;
pub const TEST_PORT: i32 = 0;
pub const SERVER_BASE: &str = "/baseDstu3";
pub const SERVER_NAME: &str = "Local Tester";
pub const SERVER_ID: &str = "home";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_format_continuations_keep_single_spaces() {
        assert!(!LOGGER_FORMAT.contains("  "));
        assert!(LOGGER_FORMAT.contains("] Operation["));
        assert!(LOGGER_FORMAT.ends_with("ResponseEncoding[${responseEncodingNoDefault}]"));
    }
}
