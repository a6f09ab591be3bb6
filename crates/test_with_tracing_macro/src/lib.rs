// Copyright (C) Microsoft Corporation. All rights reserved.

//! Proc macro for the `#[test_with_tracing::test]` attribute.
//!
//! The attribute expands to a regular `#[test]` function whose body first
//! calls `test_with_tracing::init()`, so every test in a binary logs through
//! the same `tracing` subscriber. Tests returning `Result` keep their return
//! type.
//!
//! # Examples
//!
//! ```ignore
//! use test_with_tracing::test;
//!
//! #[test]
//! fn test_sha256_abc() {
//!     tracing::info!("runs with a subscriber installed");
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;
use syn::spanned::Spanned;
use syn::ItemFn;

/// Attribute macro that marks a test and installs tracing before it runs.
///
/// See the [crate-level documentation](crate) for usage details.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = proc_macro2::TokenStream::from(attr);
    let item = parse_macro_input!(item as ItemFn);

    expand_test(attr, item)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand_test(
    attr: proc_macro2::TokenStream,
    item: ItemFn,
) -> syn::Result<proc_macro2::TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new(
            attr.span(),
            "#[test] does not take arguments",
        ));
    }

    if item.sig.asyncness.is_some() {
        return Err(syn::Error::new(
            item.sig.fn_token.span(),
            "#[test] does not support async functions",
        ));
    }

    if !item.sig.inputs.is_empty() {
        return Err(syn::Error::new(
            item.sig.inputs.span(),
            "#[test] functions cannot take parameters",
        ));
    }

    let vis = &item.vis;
    let sig = &item.sig;
    let attrs = &item.attrs;
    let body = &item.block;

    Ok(quote! {
        #[::core::prelude::v1::test]
        #(#attrs)*
        #vis #sig {
            ::test_with_tracing::init();
            #body
        }
    })
}
