use mapgen_dom::JavaType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectedColumn {
    pub actual_column_name: String,
    pub java_property: String,
    pub jdbc_type_name: String,
    pub java_type: JavaType,
    pub primary_key: bool,
    pub identity: bool,
    pub generated_always: bool,
    pub sequence: bool,
    pub nullable: bool,
    pub blob: bool,
    pub type_handler: Option<String>,
    /// Wrap the column name in delimiters when it appears in SQL
    pub delimited: bool,
    pub table_alias: Option<String>,
}

impl IntrospectedColumn {
    /// `name` or `` `name` `` for delimited columns
    pub fn escaped_column_name(&self) -> String {
        if self.delimited {
            format!("`{}`", self.actual_column_name)
        } else {
            self.actual_column_name.clone()
        }
    }

    /// Escaped name qualified with the table alias, when the table has one
    pub fn aliased_escaped_column_name(&self) -> String {
        match &self.table_alias {
            Some(alias) => format!("{}.{}", alias, self.escaped_column_name()),
            None => self.escaped_column_name(),
        }
    }

    /// MyBatis parameter placeholder, e.g. `#{record.userId,jdbcType=INTEGER}`
    pub fn parameter_clause(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => self.parameter_clause_for(&format!("{}{}", prefix, self.java_property)),
            None => self.parameter_clause_for(&self.java_property),
        }
    }

    /// Placeholder bound to an arbitrary parameter expression, keeping this
    /// column's JDBC type and type handler
    pub fn parameter_clause_for(&self, expression: &str) -> String {
        let mut clause = String::from("#{");
        clause.push_str(expression);
        clause.push_str(",jdbcType=");
        clause.push_str(&self.jdbc_type_name);
        if let Some(handler) = &self.type_handler {
            clause.push_str(",typeHandler=");
            clause.push_str(handler);
        }
        clause.push('}');
        clause
    }

    /// Getter name for the Java property
    pub fn getter_name(&self) -> String {
        let prefix = if self.java_type.full_name() == "boolean" {
            "is"
        } else {
            "get"
        };
        format!("{}{}", prefix, capitalize(&self.java_property))
    }

    pub fn setter_name(&self) -> String {
        format!("set{}", capitalize(&self.java_property))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> IntrospectedColumn {
        IntrospectedColumn {
            actual_column_name: "user_id".to_string(),
            java_property: "userId".to_string(),
            jdbc_type_name: "INTEGER".to_string(),
            java_type: JavaType::new("java.lang.Integer"),
            primary_key: false,
            identity: false,
            generated_always: false,
            sequence: false,
            nullable: true,
            blob: false,
            type_handler: None,
            delimited: false,
            table_alias: None,
        }
    }

    #[test]
    fn test_parameter_clause() {
        let c = column();
        assert_eq!(c.parameter_clause(None), "#{userId,jdbcType=INTEGER}");
        assert_eq!(
            c.parameter_clause(Some("record.")),
            "#{record.userId,jdbcType=INTEGER}"
        );
    }

    #[test]
    fn test_type_handler_in_clause() {
        let mut c = column();
        c.type_handler = Some("com.x.IdHandler".to_string());
        assert_eq!(
            c.parameter_clause(None),
            "#{userId,jdbcType=INTEGER,typeHandler=com.x.IdHandler}"
        );
    }

    #[test]
    fn test_clause_for_named_parameter() {
        let c = column();
        assert_eq!(c.parameter_clause_for("id"), "#{id,jdbcType=INTEGER}");
    }

    #[test]
    fn test_escaping_and_alias() {
        let mut c = column();
        assert_eq!(c.escaped_column_name(), "user_id");
        c.delimited = true;
        c.table_alias = Some("o".to_string());
        assert_eq!(c.escaped_column_name(), "`user_id`");
        assert_eq!(c.aliased_escaped_column_name(), "o.`user_id`");
    }

    #[test]
    fn test_accessor_names() {
        let c = column();
        assert_eq!(c.getter_name(), "getUserId");
        assert_eq!(c.setter_name(), "setUserId");
    }
}
