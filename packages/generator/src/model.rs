use mapgen_dom::{Field, JavaType, Method, Parameter, TopLevelClass, Visibility};
use mapgen_introspect::{IntrospectedColumn, IntrospectedTable};

fn add_property(class: &mut TopLevelClass, column: &IntrospectedColumn) {
    let property = &column.java_property;
    class.add_field(Field::new(property.clone(), column.java_type.clone()));
    class.add_method(
        Method::new(column.getter_name())
            .with_visibility(Visibility::Public)
            .returning(column.java_type.clone())
            .with_body_line(format!("return {};", property)),
    );
    class.add_method(
        Method::new(column.setter_name())
            .with_visibility(Visibility::Public)
            .with_parameter(Parameter::new(column.java_type.clone(), property.clone()))
            .with_body_line(format!("this.{p} = {p};", p = property)),
    );
}

/// Composite key class, for tables configured to have one
pub fn key_class(table: &IntrospectedTable) -> Option<TopLevelClass> {
    let key_type = table.primary_key_type.as_ref()?;
    let mut class = TopLevelClass::new(key_type.clone());
    for column in table.primary_key_columns() {
        add_property(&mut class, column);
    }
    Some(class)
}

/// Record class; extends the key class when there is one
pub fn record_class(table: &IntrospectedTable) -> TopLevelClass {
    let mut class = TopLevelClass::new(table.base_record_type.clone());
    let columns = match &table.primary_key_type {
        Some(key_type) => {
            class.add_import(key_type);
            class.super_class = Some(key_type.clone());
            table.non_primary_key_columns()
        }
        None => table.columns.iter().collect(),
    };
    for column in columns {
        add_property(&mut class, column);
    }
    class
}

/// Query criteria holder passed to the by-example statements
pub fn example_class(table: &IntrospectedTable) -> TopLevelClass {
    let mut class = TopLevelClass::new(table.example_type.clone());

    let string = JavaType::string();
    let boolean = JavaType::boolean();
    class.add_field(Field::new("orderByClause", string.clone()).with_visibility(Visibility::Protected));
    class.add_field(Field::new("distinct", boolean.clone()).with_visibility(Visibility::Protected));

    class.add_method(
        Method::new("setOrderByClause")
            .with_visibility(Visibility::Public)
            .with_parameter(Parameter::new(string.clone(), "orderByClause"))
            .with_body_line("this.orderByClause = orderByClause;"),
    );
    class.add_method(
        Method::new("getOrderByClause")
            .with_visibility(Visibility::Public)
            .returning(string)
            .with_body_line("return orderByClause;"),
    );
    class.add_method(
        Method::new("setDistinct")
            .with_visibility(Visibility::Public)
            .with_parameter(Parameter::new(boolean.clone(), "distinct"))
            .with_body_line("this.distinct = distinct;"),
    );
    class.add_method(
        Method::new("isDistinct")
            .with_visibility(Visibility::Public)
            .returning(boolean)
            .with_body_line("return distinct;"),
    );
    class.add_method(
        Method::new("clear")
            .with_visibility(Visibility::Public)
            .with_body_line("orderByClause = null;")
            .with_body_line("distinct = false;"),
    );

    class
}
