use serde::{Deserialize, Serialize};

/// How a table's key value is produced on insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedKey {
    pub column: String,
    /// SQL run to fetch the key; empty for JDBC-standard keys
    pub runtime_sql_statement: String,
    pub identity: bool,
    pub jdbc_standard: bool,
}

impl GeneratedKey {
    /// Resolve a dialect shortcut (`MySql`, `JDBC`, ...) or a literal statement
    pub fn from_statement(column: impl Into<String>, statement: &str, identity: bool) -> Self {
        let column = column.into();
        if statement.eq_ignore_ascii_case("JDBC") {
            return Self {
                column,
                runtime_sql_statement: String::new(),
                identity: true,
                jdbc_standard: true,
            };
        }

        let runtime_sql_statement = match statement.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => "SELECT LAST_INSERT_ID()",
            "sqlserver" => "SELECT SCOPE_IDENTITY()",
            "db2" => "VALUES IDENTITY_VAL_LOCAL()",
            "hsqldb" => "CALL IDENTITY()",
            "derby" => "VALUES IDENTITY_VAL_LOCAL()",
            "sqlite" => "SELECT LAST_INSERT_ROWID()",
            _ => statement,
        };

        Self {
            column,
            runtime_sql_statement: runtime_sql_statement.to_string(),
            identity,
            jdbc_standard: false,
        }
    }

    /// `AFTER` for identity columns, `BEFORE` for sequence style keys
    pub fn order(&self) -> &'static str {
        if self.identity {
            "AFTER"
        } else {
            "BEFORE"
        }
    }
}
