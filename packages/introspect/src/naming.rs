use mapgen_dom::JavaType;

/// `user_id` → `userId`
pub fn camel_case(name: &str) -> String {
    let pascal = pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `order_item` → `OrderItem`
pub fn pascal_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper_next = true;

    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            upper_next = true;
            continue;
        }
        if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else if is_all_upper(name) {
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}

fn is_all_upper(name: &str) -> bool {
    name.chars().any(|c| c.is_alphabetic()) && !name.chars().any(|c| c.is_lowercase())
}

/// Default Java type for a JDBC type name
pub fn java_type_for_jdbc(jdbc_type: &str) -> JavaType {
    let name = match jdbc_type.to_ascii_uppercase().as_str() {
        "BIGINT" => "java.lang.Long",
        "BIT" | "BOOLEAN" => "java.lang.Boolean",
        "TINYINT" => "java.lang.Byte",
        "SMALLINT" => "java.lang.Short",
        "INTEGER" | "INT" => "java.lang.Integer",
        "REAL" => "java.lang.Float",
        "FLOAT" | "DOUBLE" => "java.lang.Double",
        "DECIMAL" | "NUMERIC" => "java.math.BigDecimal",
        "DATE" | "TIME" | "TIMESTAMP" => "java.util.Date",
        "BINARY" | "VARBINARY" | "LONGVARBINARY" | "BLOB" => "byte[]",
        "OTHER" | "JAVA_OBJECT" => "java.lang.Object",
        _ => "java.lang.String",
    };
    JavaType::new(name)
}

/// Whether a JDBC type is treated as a large object column
pub fn is_blob_jdbc_type(jdbc_type: &str) -> bool {
    matches!(
        jdbc_type.to_ascii_uppercase().as_str(),
        "BINARY"
            | "BLOB"
            | "CLOB"
            | "LONGNVARCHAR"
            | "LONGVARBINARY"
            | "LONGVARCHAR"
            | "NCLOB"
            | "VARBINARY"
    )
}
