use crate::artifact::CompilationUnit;
use crate::java::{Interface, JavaType, Method, TopLevelClass};
use crate::writer::SourceWriter;
use crate::xml::{Document, XmlElement, XmlNode};
use std::collections::BTreeSet;

/// Options for rendering artifacts to text
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub java_indent: String,
    pub xml_indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            java_indent: "    ".to_string(),
            xml_indent: "  ".to_string(),
        }
    }
}

/// Render a Java compilation unit to source
pub fn render_java(unit: &CompilationUnit, options: &RenderOptions) -> String {
    let mut w = SourceWriter::new(&options.java_indent);

    match unit {
        CompilationUnit::Interface(interface) => render_interface(interface, &mut w),
        CompilationUnit::Class(class) => render_class(class, &mut w),
    }

    w.get_output()
}

fn render_header(ty: &JavaType, imports: &BTreeSet<String>, w: &mut SourceWriter) {
    let package = ty.package().unwrap_or("");
    if !package.is_empty() {
        w.add_line(&format!("package {};", package));
        w.blank_line();
    }

    let mut written = false;
    for import in imports {
        let same_package = import
            .rfind('.')
            .map(|idx| &import[..idx] == package)
            .unwrap_or(true);
        if same_package || import == ty.full_name() {
            continue;
        }
        w.add_line(&format!("import {};", import));
        written = true;
    }
    if written {
        w.blank_line();
    }
}

fn render_javadoc(lines: &[String], w: &mut SourceWriter) {
    for line in lines {
        w.add_line(line);
    }
}

fn render_interface(interface: &Interface, w: &mut SourceWriter) {
    render_header(&interface.ty, &interface.imports, w);
    render_javadoc(&interface.javadoc, w);

    let mut declaration = format!("{}interface {}", interface.visibility.keyword(), interface.ty);
    if !interface.super_interfaces.is_empty() {
        let supers: Vec<String> = interface
            .super_interfaces
            .iter()
            .map(|s| s.to_string())
            .collect();
        declaration.push_str(" extends ");
        declaration.push_str(&supers.join(", "));
    }
    declaration.push_str(" {");
    w.add_line(&declaration);
    w.indent();

    for (i, method) in interface.methods.iter().enumerate() {
        if i > 0 {
            w.blank_line();
        }
        render_method(method, true, w);
    }

    w.dedent();
    w.add_line("}");
}

fn render_class(class: &TopLevelClass, w: &mut SourceWriter) {
    render_header(&class.ty, &class.imports, w);
    render_javadoc(&class.javadoc, w);

    let mut declaration = format!("{}class {}", class.visibility.keyword(), class.ty);
    if let Some(super_class) = &class.super_class {
        declaration.push_str(&format!(" extends {}", super_class));
    }
    declaration.push_str(" {");
    w.add_line(&declaration);
    w.indent();

    for field in &class.fields {
        let mut line = format!("{}{} {}", field.visibility.keyword(), field.ty, field.name);
        if let Some(initializer) = &field.initializer {
            line.push_str(" = ");
            line.push_str(initializer);
        }
        line.push(';');
        w.add_line(&line);
    }

    for method in &class.methods {
        w.blank_line();
        render_method(method, false, w);
    }

    w.dedent();
    w.add_line("}");
}

fn render_method(method: &Method, in_interface: bool, w: &mut SourceWriter) {
    render_javadoc(&method.javadoc, w);
    for annotation in &method.annotations {
        w.add_line(annotation);
    }

    let parameters: Vec<String> = method
        .parameters
        .iter()
        .map(|p| {
            let mut rendered = String::new();
            for annotation in &p.annotations {
                rendered.push_str(annotation);
                rendered.push(' ');
            }
            rendered.push_str(&format!("{} {}", p.ty, p.name));
            rendered
        })
        .collect();

    let visibility = if in_interface {
        ""
    } else {
        method.visibility.keyword()
    };
    let return_type = method
        .return_type
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "void".to_string());
    let signature = format!(
        "{}{} {}({})",
        visibility,
        return_type,
        method.name,
        parameters.join(", ")
    );

    if method.is_abstract() {
        w.add_line(&format!("{};", signature));
        return;
    }

    w.add_line(&format!("{} {{", signature));
    w.indent();
    for line in &method.body_lines {
        w.add_line(line);
    }
    w.dedent();
    w.add_line("}");
}

/// Render an XML document, including the prolog and doctype
pub fn render_xml(document: &Document, options: &RenderOptions) -> String {
    let mut w = SourceWriter::new(&options.xml_indent);

    w.add_line("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    match (&document.public_id, &document.system_id) {
        (Some(public_id), Some(system_id)) => w.add_line(&format!(
            "<!DOCTYPE {} PUBLIC \"{}\" \"{}\">",
            document.root.name, public_id, system_id
        )),
        (None, Some(system_id)) => w.add_line(&format!(
            "<!DOCTYPE {} SYSTEM \"{}\">",
            document.root.name, system_id
        )),
        _ => {}
    }

    render_element(&document.root, &mut w);
    w.get_output()
}

fn render_element(element: &XmlElement, w: &mut SourceWriter) {
    let mut open = format!("<{}", element.name);
    for attribute in &element.attributes {
        open.push_str(&format!(
            " {}=\"{}\"",
            attribute.name,
            escape_attribute(&attribute.value)
        ));
    }

    if element.children.is_empty() {
        open.push_str(" />");
        w.add_line(&open);
        return;
    }

    open.push('>');
    w.add_line(&open);
    w.indent();
    for child in &element.children {
        match child {
            XmlNode::Element(child) => render_element(child, w),
            XmlNode::Text(text) => w.add_line(&escape_text(text)),
        }
    }
    w.dedent();
    w.add_line(&format!("</{}>", element.name));
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}
