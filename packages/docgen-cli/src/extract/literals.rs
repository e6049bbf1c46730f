// Structural Literal Printing
//
// Recovers default values from expressions without evaluating anything.
// Plain literals print their value, arrow functions returning a literal
// print the returned literal, and every other shape falls back to the
// expression's source text.

use oxc_ast::ast::{Expression, ObjectPropertyKind, PropertyKey, Statement};
use oxc_span::GetSpan;

/// Print a default-value expression.
pub fn print_default(expr: &Expression<'_>, source: &str) -> String {
    match expr {
        Expression::StringLiteral(lit) => lit.value.to_string(),
        Expression::BooleanLiteral(lit) => lit.value.to_string(),
        Expression::NullLiteral(_) => "null".to_string(),
        Expression::NumericLiteral(_) => slice(expr, source),
        Expression::TemplateLiteral(t) if t.expressions.is_empty() => {
            t.quasis
                .first()
                .and_then(|q| q.value.cooked.as_ref())
                .map(|c| c.to_string())
                .unwrap_or_else(|| slice(expr, source))
        }
        Expression::ArrowFunctionExpression(arrow) if arrow.expression => {
            // Factory defaults: `() => ({ open: false })` or `() => []`.
            match arrow.body.statements.first() {
                Some(Statement::ExpressionStatement(stmt)) => {
                    print_default(unwrap_parens(&stmt.expression), source)
                }
                _ => slice(expr, source),
            }
        }
        Expression::TSAsExpression(as_expr) => print_default(&as_expr.expression, source),
        Expression::ParenthesizedExpression(paren) => print_default(&paren.expression, source),
        _ => slice(expr, source),
    }
}

fn unwrap_parens<'a, 'b>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(paren) => unwrap_parens(&paren.expression),
        _ => expr,
    }
}

/// Source text of a node's span.
pub fn slice<N: GetSpan>(node: &N, source: &str) -> String {
    let span = node.span();
    source[span.start as usize..span.end as usize].to_string()
}

/// Static name of an object property or signature key. Computed keys have
/// no static name and are skipped by callers.
pub fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

/// The `(name, value)` pairs of an object literal, skipping spreads and
/// computed keys.
pub fn object_entries<'a, 'b>(
    expr: &'b Expression<'a>,
) -> Vec<(String, &'b Expression<'a>)> {
    let Expression::ObjectExpression(obj) = expr else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for prop in &obj.properties {
        if let ObjectPropertyKind::ObjectProperty(p) = prop {
            if let Some(name) = property_key_name(&p.key) {
                entries.push((name, &p.value));
            }
        }
    }
    entries
}

/// The object properties of an object literal, spreads skipped. Callers
/// that need the property span or shorthand flag use this instead of
/// [`object_entries`].
pub fn object_props<'a, 'b>(
    expr: &'b Expression<'a>,
) -> Vec<&'b oxc_ast::ast::ObjectProperty<'a>> {
    let Expression::ObjectExpression(obj) = expr else {
        return Vec::new();
    };

    obj.properties
        .iter()
        .filter_map(|prop| match prop {
            ObjectPropertyKind::ObjectProperty(p) => Some(&**p),
            _ => None,
        })
        .collect()
}

/// Unwrap `as`/`satisfies`/parenthesized wrappers around an expression.
pub fn unwrap_expression<'a, 'b>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match expr {
        Expression::TSAsExpression(e) => unwrap_expression(&e.expression),
        Expression::TSSatisfiesExpression(e) => unwrap_expression(&e.expression),
        Expression::ParenthesizedExpression(e) => unwrap_expression(&e.expression),
        _ => expr,
    }
}
