// Script Setup Extraction
//
// Walks a `<script setup>` program and pattern-matches the compiler
// macros: `defineProps` (type-argument or runtime form), `withDefaults`,
// `defineEmits`, `defineSlots`, `defineExpose`, `defineOptions`, plus
// `inject`/`provide` calls and top-level type declarations. Matching is
// purely structural; nothing is evaluated.

use super::comments::doc_comment_for;
use super::literals;
use super::options::{emits_from_runtime, props_from_runtime_object};
use oxc_ast::ast::{
    CallExpression, Declaration, Expression, Program, Statement, TSLiteral, TSSignature, TSType,
    TSTypeName,
};
use oxc_span::GetSpan;
use registry_docgen::docblock;
use registry_docgen::entities::{
    ComponentMetadata, EmitInfo, ExposeInfo, InjectInfo, PropInfo, ProvideInfo, SlotInfo, TypeInfo,
};
use std::collections::HashMap;

/// Object-literal type members declared in the same file, keyed by name.
/// `defineProps<Props>()` resolves `Props` through this table.
type TypeTable<'a, 'b> = HashMap<String, &'b oxc_allocator::Vec<'a, TSSignature<'a>>>;

pub fn extract<'a>(program: &Program<'a>, source: &str) -> ComponentMetadata {
    let mut meta = ComponentMetadata::default();
    apply_file_docblock(&mut meta, program, source);

    let types = collect_type_table(program);

    for stmt in &program.body {
        handle_statement(stmt, program, source, &types, &mut meta);
    }

    meta
}

fn handle_statement<'a>(
    stmt: &Statement<'a>,
    program: &Program<'a>,
    source: &str,
    types: &TypeTable<'a, '_>,
    meta: &mut ComponentMetadata,
) {
    match stmt {
        Statement::ExpressionStatement(s) => {
            handle_expression(&s.expression, program, source, types, meta);
        }
        Statement::VariableDeclaration(decl) => {
            for declarator in &decl.declarations {
                if let Some(init) = &declarator.init {
                    handle_expression(init, program, source, types, meta);
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
        Statement::ExportNamedDeclaration(export) => {
            if let Some(decl) = &export.declaration {
                handle_declaration(decl, program, source, types, meta);
            }
        }
        _ => {}
    }
}

fn handle_declaration<'a>(
    decl: &Declaration<'a>,
    program: &Program<'a>,
    source: &str,
    types: &TypeTable<'a, '_>,
    meta: &mut ComponentMetadata,
) {
    match decl {
        Declaration::VariableDeclaration(var) => {
            for declarator in &var.declarations {
                if let Some(init) = &declarator.init {
                    handle_expression(init, program, source, types, meta);
                }
            }
        }
        Declaration::TSTypeAliasDeclaration(d) => {
            meta.types.push(TypeInfo {
                name: d.id.name.to_string(),
                definition: literals::slice(decl, source),
                description: doc_comment_for(program, source, decl.span().start),
            });
        }
        Declaration::TSInterfaceDeclaration(d) => {
            meta.types.push(TypeInfo {
                name: d.id.name.to_string(),
                definition: literals::slice(decl, source),
                description: doc_comment_for(program, source, decl.span().start),
            });
        }
        _ => {}
    }
}

fn handle_expression<'a>(
    expr: &Expression<'a>,
    program: &Program<'a>,
    source: &str,
    types: &TypeTable<'a, '_>,
    meta: &mut ComponentMetadata,
) {
    let Expression::CallExpression(call) = literals::unwrap_expression(expr) else {
        return;
    };

    match call_name(call) {
        Some("defineProps") => {
            meta.props.extend(extract_props(call, program, source, types));
        }
        Some("withDefaults") => {
            meta.props.extend(extract_with_defaults(call, program, source, types));
        }
        Some("defineEmits") => {
            meta.emits.extend(extract_emits(call, program, source, types));
        }
        Some("defineSlots") => {
            meta.slots.extend(extract_slots(call, program, source, types));
        }
        Some("defineExpose") => {
            meta.exposes.extend(extract_expose(call, program, source));
        }
        Some("defineOptions") => {
            apply_define_options(call, meta);
        }
        Some("inject") => {
            if let Some(info) = extract_inject(call, program, source) {
                meta.injects.push(info);
            }
        }
        Some("provide") => {
            if let Some(info) = extract_provide(call, program, source) {
                meta.provides.push(info);
            }
        }
        _ => {}
    }
}

fn call_name<'a, 'b>(call: &'b CallExpression<'a>) -> Option<&'b str> {
    match &call.callee {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        _ => None,
    }
}

/// First type argument of a call, e.g. the `{...}` in `defineProps<{...}>()`.
fn first_type_argument<'a, 'b>(call: &'b CallExpression<'a>) -> Option<&'b TSType<'a>> {
    call.type_arguments.as_ref().and_then(|args| args.params.first())
}

fn first_argument<'a, 'b>(call: &'b CallExpression<'a>) -> Option<&'b Expression<'a>> {
    call.arguments.first().and_then(|arg| arg.as_expression())
}

fn second_argument<'a, 'b>(call: &'b CallExpression<'a>) -> Option<&'b Expression<'a>> {
    call.arguments.get(1).and_then(|arg| arg.as_expression())
}

/// Resolve a type expression to object-literal members, following one
/// level of local type reference (`Props` declared in the same file).
fn resolve_members<'a, 'b>(
    ts_type: &'b TSType<'a>,
    types: &TypeTable<'a, 'b>,
) -> Option<&'b oxc_allocator::Vec<'a, TSSignature<'a>>>
where
    'a: 'b,
{
    match ts_type {
        TSType::TSTypeLiteral(lit) => Some(&lit.members),
        TSType::TSTypeReference(reference) => match &reference.type_name {
            TSTypeName::IdentifierReference(ident) => types.get(ident.name.as_str()).copied(),
            _ => None,
        },
        _ => None,
    }
}

fn collect_type_table<'a, 'b>(program: &'b Program<'a>) -> TypeTable<'a, 'b> {
    let mut table = TypeTable::new();

    for stmt in &program.body {
        let decl = match stmt {
            Statement::TSInterfaceDeclaration(d) => {
                table.insert(d.id.name.to_string(), &d.body.body);
                continue;
            }
            Statement::TSTypeAliasDeclaration(d) => Some(d),
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::TSInterfaceDeclaration(d)) => {
                    table.insert(d.id.name.to_string(), &d.body.body);
                    continue;
                }
                Some(Declaration::TSTypeAliasDeclaration(d)) => Some(d),
                _ => None,
            },
            _ => None,
        };

        if let Some(d) = decl {
            if let TSType::TSTypeLiteral(lit) = &d.type_annotation {
                table.insert(d.id.name.to_string(), &lit.members);
            }
        }
    }

    table
}

fn extract_props<'a>(
    call: &CallExpression<'a>,
    program: &Program<'a>,
    source: &str,
    types: &TypeTable<'a, '_>,
) -> Vec<PropInfo> {
    if let Some(members) = first_type_argument(call).and_then(|t| resolve_members(t, types)) {
        return props_from_members(members, program, source);
    }
    if let Some(arg) = first_argument(call) {
        return props_from_runtime_object(literals::unwrap_expression(arg), program, source);
    }
    Vec::new()
}

fn props_from_members<'a>(
    members: &oxc_allocator::Vec<'a, TSSignature<'a>>,
    program: &Program<'a>,
    source: &str,
) -> Vec<PropInfo> {
    let mut props = Vec::new();

    for member in members.iter() {
        let TSSignature::TSPropertySignature(sig) = member else {
            continue;
        };
        let Some(name) = literals::property_key_name(&sig.key) else {
            continue;
        };

        let prop_type = sig
            .type_annotation
            .as_ref()
            .map(|ann| literals::slice(&ann.type_annotation, source))
            .unwrap_or_else(|| "unknown".to_string());

        let mut prop = PropInfo::new(name, prop_type);
        prop.description = doc_comment_for(program, source, sig.span.start);
        props.push(prop);
    }

    props
}

/// `withDefaults(defineProps<Props>(), { ... })`: extract the props from
/// the inner call, then overwrite defaults from the object literal using
/// structural literal printing only.
fn extract_with_defaults<'a>(
    call: &CallExpression<'a>,
    program: &Program<'a>,
    source: &str,
    types: &TypeTable<'a, '_>,
) -> Vec<PropInfo> {
    let inner = match first_argument(call).map(literals::unwrap_expression) {
        Some(Expression::CallExpression(inner)) if call_name(inner) == Some("defineProps") => inner,
        _ => return Vec::new(),
    };

    let mut props = extract_props(inner, program, source, types);

    if let Some(defaults) = second_argument(call) {
        for (name, value) in literals::object_entries(literals::unwrap_expression(defaults)) {
            if let Some(prop) = props.iter_mut().find(|p| p.name == name) {
                prop.default = literals::print_default(value, source);
            }
        }
    }

    props
}

fn extract_emits<'a>(
    call: &CallExpression<'a>,
    program: &Program<'a>,
    source: &str,
    types: &TypeTable<'a, '_>,
) -> Vec<EmitInfo> {
    if let Some(members) = first_type_argument(call).and_then(|t| resolve_members(t, types)) {
        return emits_from_members(members, program, source);
    }
    if let Some(arg) = first_argument(call) {
        return emits_from_runtime(literals::unwrap_expression(arg), program, source);
    }
    Vec::new()
}

fn emits_from_members<'a>(
    members: &oxc_allocator::Vec<'a, TSSignature<'a>>,
    program: &Program<'a>,
    source: &str,
) -> Vec<EmitInfo> {
    let mut emits = Vec::new();

    for member in members.iter() {
        match member {
            // Tuple form: `change: [value: number]`.
            TSSignature::TSPropertySignature(sig) => {
                let Some(name) = literals::property_key_name(&sig.key) else {
                    continue;
                };
                let params = match sig.type_annotation.as_ref().map(|a| &a.type_annotation) {
                    Some(TSType::TSTupleType(tuple)) => tuple
                        .element_types
                        .iter()
                        .map(|e| literals::slice(e, source))
                        .collect(),
                    Some(other) => vec![literals::slice(other, source)],
                    None => Vec::new(),
                };
                emits.push(EmitInfo {
                    name,
                    params,
                    description: doc_comment_for(program, source, sig.span.start),
                });
            }
            // Call-signature form: `(e: 'change', value: number): void`.
            TSSignature::TSCallSignatureDeclaration(sig) => {
                let mut params_iter = sig.params.items.iter();
                let Some(event_param) = params_iter.next() else {
                    continue;
                };
                let Some(name) = string_literal_type(event_param.pattern.type_annotation.as_ref().map(|a| &a.type_annotation))
                else {
                    continue;
                };
                let params = params_iter.map(|p| literals::slice(p, source)).collect();
                emits.push(EmitInfo {
                    name,
                    params,
                    description: doc_comment_for(program, source, sig.span.start),
                });
            }
            _ => {}
        }
    }

    emits
}

fn string_literal_type(ts_type: Option<&TSType<'_>>) -> Option<String> {
    match ts_type {
        Some(TSType::TSLiteralType(lit)) => match &lit.literal {
            TSLiteral::StringLiteral(s) => Some(s.value.to_string()),
            _ => None,
        },
        _ => None,
    }
}

fn extract_slots<'a>(
    call: &CallExpression<'a>,
    program: &Program<'a>,
    source: &str,
    types: &TypeTable<'a, '_>,
) -> Vec<SlotInfo> {
    let Some(members) = first_type_argument(call).and_then(|t| resolve_members(t, types)) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    for member in members.iter() {
        match member {
            // `default(props: { item: T }): any`
            TSSignature::TSMethodSignature(sig) => {
                let Some(name) = literals::property_key_name(&sig.key) else {
                    continue;
                };
                slots.push(SlotInfo {
                    name,
                    params: sig.params.items.iter().map(|p| literals::slice(p, source)).collect(),
                    description: doc_comment_for(program, source, sig.span.start),
                });
            }
            // `footer: (props: { year: number }) => any`
            TSSignature::TSPropertySignature(sig) => {
                let Some(name) = literals::property_key_name(&sig.key) else {
                    continue;
                };
                let params = match sig.type_annotation.as_ref().map(|a| &a.type_annotation) {
                    Some(TSType::TSFunctionType(func)) => func
                        .params
                        .items
                        .iter()
                        .map(|p| literals::slice(p, source))
                        .collect(),
                    _ => Vec::new(),
                };
                slots.push(SlotInfo {
                    name,
                    params,
                    description: doc_comment_for(program, source, sig.span.start),
                });
            }
            _ => {}
        }
    }

    slots
}

fn extract_expose<'a>(
    call: &CallExpression<'a>,
    program: &Program<'a>,
    source: &str,
) -> Vec<ExposeInfo> {
    let Some(arg) = first_argument(call) else {
        return Vec::new();
    };

    let mut exposes = Vec::new();
    for prop in literals::object_props(literals::unwrap_expression(arg)) {
        let Some(name) = literals::property_key_name(&prop.key) else {
            continue;
        };
        let expose_type = if prop.shorthand {
            "unknown".to_string()
        } else {
            literals::slice(&prop.value, source)
        };
        exposes.push(ExposeInfo {
            name,
            expose_type,
            description: doc_comment_for(program, source, prop.span.start),
        });
    }

    exposes
}

fn apply_define_options<'a>(call: &CallExpression<'a>, meta: &mut ComponentMetadata) {
    let Some(arg) = first_argument(call) else {
        return;
    };
    for (name, value) in literals::object_entries(literals::unwrap_expression(arg)) {
        if name == "name" {
            if let Expression::StringLiteral(lit) = value {
                meta.name = lit.value.to_string();
            }
        }
    }
}

fn extract_inject<'a>(
    call: &CallExpression<'a>,
    program: &Program<'a>,
    source: &str,
) -> Option<InjectInfo> {
    let key_expr = first_argument(call)?;
    let key = injection_key(key_expr, source);
    let value_type = first_type_argument(call)
        .map(|t| literals::slice(t, source))
        .unwrap_or_else(|| "unknown".to_string());

    Some(InjectInfo {
        key,
        value_type,
        description: doc_comment_for(program, source, call.span.start),
    })
}

fn extract_provide<'a>(
    call: &CallExpression<'a>,
    program: &Program<'a>,
    source: &str,
) -> Option<ProvideInfo> {
    let key_expr = first_argument(call)?;
    let key = injection_key(key_expr, source);
    let value_type = first_type_argument(call)
        .map(|t| literals::slice(t, source))
        .or_else(|| second_argument(call).map(|v| literals::slice(v, source)))
        .unwrap_or_else(|| "unknown".to_string());

    Some(ProvideInfo {
        key,
        value_type,
        description: doc_comment_for(program, source, call.span.start),
    })
}

/// Injection keys are string literals or symbol identifiers; either way
/// the source text is the name users look up.
fn injection_key(expr: &Expression<'_>, source: &str) -> String {
    match expr {
        Expression::StringLiteral(lit) => lit.value.to_string(),
        _ => literals::slice(expr, source),
    }
}

/// File-level doc block: a comment preceding the first statement. Its
/// tags seed title, category and author; its body seeds the description.
pub(super) fn apply_file_docblock(meta: &mut ComponentMetadata, program: &Program<'_>, source: &str) {
    let first_stmt_start = program
        .body
        .first()
        .map(|s| s.span().start)
        .unwrap_or(u32::MAX);

    let Some(comment) = program
        .comments
        .iter()
        .find(|c| c.span.end <= first_stmt_start)
    else {
        return;
    };

    let block = docblock::parse(&source[comment.span.start as usize..comment.span.end as usize]);
    meta.description = block.description.clone();
    if let Some(title) = block.tag("title") {
        meta.title = title.to_string();
    }
    if let Some(category) = block.tag("category") {
        meta.category = category.to_string();
    }
    if let Some(author) = block.tag("author") {
        meta.author = author.to_string();
    }
}
