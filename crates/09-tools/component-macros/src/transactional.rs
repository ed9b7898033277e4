//! `#[transactional_capability]` 实现
//!
//! 为 `TransactionalProxy<dyn Trait>` 生成逐方法委托：每个方法都经由
//! `TransactionalProxy::invoke` 在事务边界内调用被包裹实例

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{FnArg, Ident, ItemTrait, Pat, PatIdent, Result, TraitItem, TraitItemFn, WherePredicate};

/// 方法是否带 `where Self: Sized`
fn requires_sized(method: &TraitItemFn) -> bool {
    method.sig.generics.where_clause.as_ref().is_some_and(|clause| {
        clause.predicates.iter().any(|predicate| match predicate {
            WherePredicate::Type(bound) => {
                let bounded = &bound.bounded_ty;
                let bounds = &bound.bounds;
                quote!(#bounded).to_string() == "Self"
                    && bounds.iter().any(|b| quote!(#b).to_string() == "Sized")
            }
            _ => false,
        })
    })
}

/// 生成单个方法的委托实现
fn delegate(method: &TraitItemFn) -> Result<TokenStream> {
    let mut sig = method.sig.clone();
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "事务代理不支持 async 方法"));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(unsafety, "事务代理不支持 unsafe 方法"));
    }

    match sig.inputs.first() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &sig,
                "事务代理的方法必须以 &self 为接收者",
            ))
        }
    }

    // 参数改写为固定名称，模式参数也能原样转发
    let mut args = Vec::new();
    for (index, input) in sig.inputs.iter_mut().skip(1).enumerate() {
        if let FnArg::Typed(typed) = input {
            let ident = Ident::new(&format!("__arg{index}"), Span::call_site());
            typed.pat = Box::new(Pat::Ident(PatIdent {
                attrs: Vec::new(),
                by_ref: None,
                mutability: None,
                ident: ident.clone(),
                subpat: None,
            }));
            args.push(ident);
        }
    }

    let name = &sig.ident;
    Ok(quote! {
        #sig {
            self.invoke(move |__inner| __inner.#name(#(#args),*))
        }
    })
}

/// 生成事务代理实现
pub fn expand_transactional_capability(item: &ItemTrait) -> Result<TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[transactional_capability] 不支持泛型 trait",
        ));
    }

    let mut methods = Vec::new();
    for trait_item in &item.items {
        let TraitItem::Fn(method) = trait_item else {
            continue;
        };
        if requires_sized(method) && method.default.is_some() {
            continue;
        }
        methods.push(delegate(method)?);
    }

    let trait_name = &item.ident;
    Ok(quote! {
        #item

        impl #trait_name for ::infrastructure_common::TransactionalProxy<dyn #trait_name> {
            #(#methods)*
        }
    })
}
