//! AST visitor collecting the calls made through a translation function alias.

use swc_common::SourceMap;
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ExprOrSpread, Lit, MemberExpr, MemberProp, Module, OptChainBase, Prop,
    PropName, PropOrSpread, Tpl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::call::{Argument, CallExpression, Literal, Property};
use crate::core::parsers::ParsedSource;

/// Collect every call made through `alias` in `parsed`, in source order.
///
/// Calls nested inside the arguments of another matched call are returned
/// after their enclosing call. Type arguments (`t<string>('key')`) are
/// ignored.
pub fn scan_calls(
    parsed: &ParsedSource,
    alias: &str,
) -> impl Iterator<Item = CallExpression> + use<> {
    CallScanner::new(alias, &parsed.source_map)
        .scan(&parsed.module)
        .into_iter()
}

struct CallScanner<'a> {
    alias: &'a str,
    source_map: &'a SourceMap,
    calls: Vec<CallExpression>,
}

impl<'a> CallScanner<'a> {
    fn new(alias: &'a str, source_map: &'a SourceMap) -> Self {
        Self {
            alias,
            source_map,
            calls: Vec::new(),
        }
    }

    fn scan(mut self, module: &Module) -> Vec<CallExpression> {
        self.visit_module(module);
        self.calls
    }

    fn is_alias_call(&self, call: &CallExpr) -> bool {
        match &call.callee {
            Callee::Expr(expr) => match unwrap_expr(expr) {
                Expr::Ident(ident) => &*ident.sym == self.alias,
                _ => false,
            },
            _ => false,
        }
    }
}

impl Visit for CallScanner<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.is_alias_call(node) {
            let line = self.source_map.lookup_char_pos(node.span.lo).line;
            self.calls.push(CallExpression {
                callee: self.alias.to_string(),
                line,
                arguments: convert_arguments(&node.args),
            });
        }
        node.visit_children_with(self);
    }
}

fn convert_arguments(args: &[ExprOrSpread]) -> Vec<Argument> {
    args.iter()
        .map(|arg| {
            if arg.spread.is_some() {
                Argument::Unsupported
            } else {
                convert_expr(&arg.expr)
            }
        })
        .collect()
}

/// Strip wrappers that do not change the value of an expression:
/// parentheses and TypeScript `as`, `satisfies`, `!` and `<T>` assertions.
fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(ts) => unwrap_expr(&ts.expr),
        Expr::TsSatisfies(ts) => unwrap_expr(&ts.expr),
        Expr::TsNonNull(ts) => unwrap_expr(&ts.expr),
        Expr::TsConstAssertion(ts) => unwrap_expr(&ts.expr),
        Expr::TsTypeAssertion(ts) => unwrap_expr(&ts.expr),
        _ => expr,
    }
}

fn convert_expr(expr: &Expr) -> Argument {
    match unwrap_expr(expr) {
        Expr::Lit(lit) => convert_lit(lit),
        Expr::Tpl(tpl) => Argument::Literal(Literal::Str(template_text(tpl))),
        Expr::Ident(ident) if &*ident.sym == "undefined" => Argument::Literal(Literal::Null),
        Expr::Ident(ident) => Argument::Identifier(ident.sym.to_string()),
        Expr::Member(_) | Expr::OptChain(_) => {
            Argument::Identifier(reference_path(expr).unwrap_or_else(|| "<member>".to_string()))
        }
        Expr::Array(array) => Argument::Array(
            array
                .elems
                .iter()
                .flatten()
                .filter(|elem| elem.spread.is_none())
                .map(|elem| convert_expr(&elem.expr))
                .collect(),
        ),
        Expr::Object(object) => Argument::Object(
            object
                .props
                .iter()
                .filter_map(|prop| match prop {
                    PropOrSpread::Prop(prop) => convert_prop(prop),
                    PropOrSpread::Spread(_) => None,
                })
                .collect(),
        ),
        Expr::Call(_) | Expr::New(_) | Expr::TaggedTpl(_) => Argument::Call,
        _ => Argument::Unsupported,
    }
}

fn convert_lit(lit: &Lit) -> Argument {
    match lit {
        Lit::Str(s) => Argument::Literal(Literal::Str(s.value.to_string_lossy().to_string())),
        Lit::Num(n) => Argument::Literal(Literal::Num(n.value)),
        Lit::Bool(b) => Argument::Literal(Literal::Bool(b.value)),
        Lit::Null(_) => Argument::Literal(Literal::Null),
        _ => Argument::Unsupported,
    }
}

fn convert_prop(prop: &Prop) -> Option<Property> {
    match prop {
        Prop::KeyValue(kv) => Some(Property {
            key: prop_name(&kv.key)?,
            value: convert_expr(&kv.value),
        }),
        Prop::Shorthand(ident) => Some(Property {
            key: ident.sym.to_string(),
            value: Argument::Identifier(ident.sym.to_string()),
        }),
        _ => None,
    }
}

fn prop_name(name: &PropName) -> Option<String> {
    match name {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string_lossy().to_string()),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

/// Text of a template literal, with each substitution rendered as
/// `${name}` (or `${...}` for anything but a plain reference).
///
/// Examples:
/// - `` `app.title` `` → `app.title`
/// - `` `app.${section}.title` `` → `app.${section}.title`
fn template_text(tpl: &Tpl) -> String {
    let mut text = String::new();
    for (index, quasi) in tpl.quasis.iter().enumerate() {
        match &quasi.cooked {
            Some(cooked) => text.push_str(&cooked.to_string_lossy()),
            None => text.push_str(&quasi.raw),
        }
        if let Some(expr) = tpl.exprs.get(index) {
            let name = reference_path(expr).unwrap_or_else(|| "...".to_string());
            text.push_str(&format!("${{{}}}", name));
        }
    }
    text
}

/// Dotted path of a plain reference chain (`a`, `a.b`, `a?.b.c`).
fn reference_path(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => member_path(member),
        Expr::OptChain(chain) => match &*chain.base {
            OptChainBase::Member(member) => member_path(member),
            OptChainBase::Call(_) => None,
        },
        _ => None,
    }
}

fn member_path(member: &MemberExpr) -> Option<String> {
    let object = reference_path(&member.obj)?;
    match &member.prop {
        MemberProp::Ident(prop) => Some(format!("{}.{}", object, prop.sym)),
        _ => Some(format!("{}[]", object)),
    }
}
