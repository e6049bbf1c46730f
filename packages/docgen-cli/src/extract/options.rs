// Options Object Extraction
//
// The second authoring style: a plain configuration object, either
// `export default { props: {...} }` or wrapped in `defineComponent(...)`.
// Shares the runtime prop/emit parsing with the script-setup variant.

use super::comments::doc_comment_for;
use super::literals;
use super::script_setup::apply_file_docblock;
use oxc_ast::ast::{ArrayExpressionElement, Declaration, Expression, Program, Statement};
use oxc_span::GetSpan;
use registry_docgen::entities::{
    ComponentMetadata, EmitInfo, ExposeInfo, InjectInfo, PropInfo, ProvideInfo, TypeInfo,
};

pub fn extract<'a>(program: &Program<'a>, source: &str) -> ComponentMetadata {
    let mut meta = ComponentMetadata::default();
    apply_file_docblock(&mut meta, program, source);

    for stmt in &program.body {
        match stmt {
            Statement::ExportDefaultDeclaration(export) => {
                if let Some(expr) = export.declaration.as_expression() {
                    if let Some(options) = options_object(expr) {
                        extract_options_object(options, program, source, &mut meta);
                    }
                }
            }
            Statement::TSTypeAliasDeclaration(decl) => {
                meta.types.push(TypeInfo {
                    name: decl.id.name.to_string(),
                    definition: literals::slice(stmt, source),
                    description: doc_comment_for(program, source, stmt.span().start),
                });
            }
            Statement::TSInterfaceDeclaration(decl) => {
                meta.types.push(TypeInfo {
                    name: decl.id.name.to_string(),
                    definition: literals::slice(stmt, source),
                    description: doc_comment_for(program, source, stmt.span().start),
                });
            }
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::TSTypeAliasDeclaration(d)) => {
                    meta.types.push(TypeInfo {
                        name: d.id.name.to_string(),
                        definition: literals::slice(stmt, source),
                        description: doc_comment_for(program, source, stmt.span().start),
                    });
                }
                Some(Declaration::TSInterfaceDeclaration(d)) => {
                    meta.types.push(TypeInfo {
                        name: d.id.name.to_string(),
                        definition: literals::slice(stmt, source),
                        description: doc_comment_for(program, source, stmt.span().start),
                    });
                }
                _ => {}
            },
            _ => {}
        }
    }

    meta
}

/// Unwrap the configuration object from the default export: a plain
/// object literal, or the single object argument of a wrapping call such
/// as `defineComponent({...})`.
fn options_object<'a, 'b>(expr: &'b Expression<'a>) -> Option<&'b Expression<'a>> {
    let expr = literals::unwrap_expression(expr);
    match expr {
        Expression::ObjectExpression(_) => Some(expr),
        Expression::CallExpression(call) => call
            .arguments
            .first()
            .and_then(|arg| arg.as_expression())
            .map(literals::unwrap_expression)
            .filter(|inner| matches!(inner, Expression::ObjectExpression(_))),
        _ => None,
    }
}

fn extract_options_object<'a>(
    options: &Expression<'a>,
    program: &Program<'a>,
    source: &str,
    meta: &mut ComponentMetadata,
) {
    for (name, value) in literals::object_entries(options) {
        let value = literals::unwrap_expression(value);
        match name.as_str() {
            "name" => {
                if let Expression::StringLiteral(lit) = value {
                    meta.name = lit.value.to_string();
                }
            }
            "props" => match value {
                Expression::ArrayExpression(_) => {
                    meta.props.extend(props_from_string_array(value));
                }
                _ => {
                    meta.props
                        .extend(props_from_runtime_object(value, program, source));
                }
            },
            "emits" => {
                meta.emits.extend(emits_from_runtime(value, program, source));
            }
            "expose" => {
                meta.exposes.extend(expose_from_array(value));
            }
            "inject" => {
                meta.injects.extend(injects_from_runtime(value, source));
            }
            "provide" => {
                meta.provides.extend(provides_from_runtime(value, program, source));
            }
            _ => {}
        }
    }
}

/// Per-prop runtime configuration: either a nested object with
/// `type`/`default` keys or a bare constructor expression.
pub(super) fn props_from_runtime_object<'a>(
    obj: &Expression<'a>,
    program: &Program<'a>,
    source: &str,
) -> Vec<PropInfo> {
    let mut props = Vec::new();

    for prop in literals::object_props(obj) {
        let Some(name) = literals::property_key_name(&prop.key) else {
            continue;
        };
        let value = literals::unwrap_expression(&prop.value);

        let mut info = PropInfo::new(name, "unknown");
        match value {
            Expression::ObjectExpression(_) => {
                for (key, entry) in literals::object_entries(value) {
                    match key.as_str() {
                        "type" => info.prop_type = literals::slice(entry, source),
                        "default" => info.default = literals::print_default(entry, source),
                        _ => {}
                    }
                }
            }
            _ => {
                // Bare constructor form: `size: String`.
                info.prop_type = literals::slice(value, source);
            }
        }
        info.description = doc_comment_for(program, source, prop.span.start);
        props.push(info);
    }

    props
}

fn props_from_string_array(expr: &Expression<'_>) -> Vec<PropInfo> {
    string_array(expr)
        .into_iter()
        .map(|name| PropInfo::new(name, "unknown"))
        .collect()
}

/// `emits: ['change', 'close']` or `emits: { change: (v) => true }`.
pub(super) fn emits_from_runtime<'a>(
    expr: &Expression<'a>,
    program: &Program<'a>,
    source: &str,
) -> Vec<EmitInfo> {
    match expr {
        Expression::ArrayExpression(_) => string_array(expr)
            .into_iter()
            .map(|name| EmitInfo {
                name,
                params: Vec::new(),
                description: String::new(),
            })
            .collect(),
        Expression::ObjectExpression(_) => literals::object_props(expr)
            .into_iter()
            .filter_map(|prop| {
                let name = literals::property_key_name(&prop.key)?;
                Some(EmitInfo {
                    name,
                    params: Vec::new(),
                    description: doc_comment_for(program, source, prop.span.start),
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn expose_from_array(expr: &Expression<'_>) -> Vec<ExposeInfo> {
    string_array(expr)
        .into_iter()
        .map(|name| ExposeInfo {
            name,
            expose_type: "unknown".to_string(),
            description: String::new(),
        })
        .collect()
}

fn injects_from_runtime(expr: &Expression<'_>, source: &str) -> Vec<InjectInfo> {
    match expr {
        Expression::ArrayExpression(_) => string_array(expr)
            .into_iter()
            .map(|key| InjectInfo {
                key,
                value_type: "unknown".to_string(),
                description: String::new(),
            })
            .collect(),
        Expression::ObjectExpression(_) => literals::object_props(expr)
            .into_iter()
            .filter_map(|prop| {
                let key = literals::property_key_name(&prop.key)?;
                Some(InjectInfo {
                    key,
                    value_type: literals::slice(&prop.value, source),
                    description: String::new(),
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn provides_from_runtime<'a>(
    expr: &Expression<'a>,
    program: &Program<'a>,
    source: &str,
) -> Vec<ProvideInfo> {
    literals::object_props(expr)
        .into_iter()
        .filter_map(|prop| {
            let key = literals::property_key_name(&prop.key)?;
            Some(ProvideInfo {
                key,
                value_type: literals::slice(&prop.value, source),
                description: doc_comment_for(program, source, prop.span.start),
            })
        })
        .collect()
}

fn string_array(expr: &Expression<'_>) -> Vec<String> {
    let Expression::ArrayExpression(array) = expr else {
        return Vec::new();
    };

    array
        .elements
        .iter()
        .filter_map(|element| match element {
            ArrayExpressionElement::StringLiteral(lit) => Some(lit.value.to_string()),
            _ => None,
        })
        .collect()
}
