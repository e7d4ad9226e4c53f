use crate::*;

fn base_mapper() -> Interface {
    let ty = JavaType::new("com.x.BaseMapper")
        .with_argument(JavaType::variable("T"))
        .with_argument(JavaType::variable("PK"));
    let mut interface = Interface::new(ty);

    let select = Method::new("selectByPrimaryKey")
        .returning(JavaType::variable("T"))
        .with_parameter(Parameter::new(JavaType::variable("PK"), "id"));
    let update = Method::new("updateManuallyById")
        .returning(JavaType::int())
        .with_parameter(Parameter::named(JavaType::string(), "updateClause"))
        .with_parameter(Parameter::named(JavaType::variable("PK"), "id"));
    interface.add_method(select);
    interface.add_method(update);
    interface.add_import_name("org.apache.ibatis.annotations.Param");
    interface
}

#[test]
fn test_render_generic_interface() {
    let unit = CompilationUnit::Interface(base_mapper());
    let result = render_java(&unit, &RenderOptions::default());

    println!("Generated interface:\n{}", result);

    assert!(result.starts_with("package com.x;\n"));
    assert!(result.contains("import org.apache.ibatis.annotations.Param;"));
    assert!(result.contains("public interface BaseMapper<T, PK> {"));
    assert!(result.contains("    T selectByPrimaryKey(PK id);"));
    assert!(result.contains(
        "    int updateManuallyById(@Param(\"updateClause\") String updateClause, @Param(\"id\") PK id);"
    ));
}

#[test]
fn test_render_mapper_with_super_interface() {
    let mut mapper = Interface::new(JavaType::new("com.x.mapper.UserMapper"));
    mapper.add_super_interface(
        JavaType::new("com.x.BaseMapper")
            .with_argument(JavaType::new("com.x.model.User"))
            .with_argument(JavaType::new("java.lang.Integer")),
    );
    mapper.add_import(&JavaType::new("com.x.model.User"));

    let result = render_java(&CompilationUnit::Interface(mapper), &RenderOptions::default());

    println!("Generated mapper:\n{}", result);

    assert!(result.contains("import com.x.BaseMapper;"));
    assert!(result.contains("import com.x.model.User;"));
    assert!(!result.contains("import java.lang.Integer;"));
    assert!(result.contains("public interface UserMapper extends BaseMapper<User, Integer> {"));
}

#[test]
fn test_render_class_with_bodies() {
    let mut class = TopLevelClass::new(JavaType::new("com.x.model.UserExample"));
    class.add_field(
        Field::new("limit", JavaType::new("java.lang.Integer")).with_visibility(Visibility::Protected),
    );
    class.add_method(
        Method::new("getLimit")
            .with_visibility(Visibility::Public)
            .returning(JavaType::new("java.lang.Integer"))
            .with_body_line("return limit;"),
    );

    let result = render_java(&CompilationUnit::Class(class), &RenderOptions::default());

    println!("Generated class:\n{}", result);

    assert!(result.contains("public class UserExample {"));
    assert!(result.contains("    protected Integer limit;"));
    assert!(result.contains("    public Integer getLimit() {\n        return limit;\n    }"));
}

#[test]
fn test_render_xml_document() {
    let mut doc = Document::mapper("com.x.mapper.UserMapper");
    doc.root.add_child(
        XmlElement::new("select")
            .with_attribute("id", "existByExample")
            .with_attribute("resultType", "boolean")
            .with_text("select")
            .with_text("count(*) > 0")
            .with_text("from user")
            .with_child(
                XmlElement::new("if")
                    .with_attribute("test", "_parameter != null")
                    .with_child(
                        XmlElement::new("include").with_attribute("refid", "Example_Where_Clause"),
                    ),
            ),
    );

    let result = render_xml(&doc, &RenderOptions::default());

    println!("Generated XML:\n{}", result);

    assert!(result.contains("<!DOCTYPE mapper PUBLIC \"-//mybatis.org//DTD Mapper 3.0//EN\""));
    assert!(result.contains("<mapper namespace=\"com.x.mapper.UserMapper\">"));
    assert!(result.contains("    count(*) > 0"));
    assert!(result.contains("<include refid=\"Example_Where_Clause\" />"));
    assert!(result.trim_end().ends_with("</mapper>"));
}

#[test]
fn test_render_xml_escapes_markup() {
    let doc = Document::new(
        XmlElement::new("if")
            .with_attribute("test", "a < b && c")
            .with_text("x < 1"),
    );

    let result = render_xml(&doc, &RenderOptions::default());

    assert!(result.contains("test=\"a &lt; b &amp;&amp; c\""));
    assert!(result.contains("x &lt; 1"));
    assert!(!result.contains("<!DOCTYPE"));
}
