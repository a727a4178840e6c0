//! `#[derive(Describe)]` 实现

use proc_macro2::TokenStream;
use quote::quote;
use syn::{punctuated::Punctuated, DeriveInput, Expr, ExprPath, Result, Token, Type};

/// `#[describe(...)]` 参数
#[derive(Default)]
struct DescribeArgs {
    handles: Vec<Type>,
    constructor: Option<ExprPath>,
    capabilities: Vec<Expr>,
}

impl DescribeArgs {
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("describe")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("handles") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let commands = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.handles.extend(commands);
                    Ok(())
                } else if meta.path.is_ident("constructor") {
                    if args.constructor.is_some() {
                        return Err(meta.error("constructor 只能指定一次"));
                    }
                    args.constructor = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("capability") {
                    args.capabilities.push(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("未知的 describe 参数，可用: handles(...), constructor = path, capability = expr"))
                }
            })?;
        }

        Ok(args)
    }
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Describe 不能用于泛型类型，开放泛型请手写 TypeDescriptor::open_generic",
        ));
    }

    let args = DescribeArgs::from_input(&input)?;
    let name = &input.ident;

    let base = match &args.constructor {
        Some(constructor) => quote! {
            ::di_abstractions::TypeDescriptor::concrete::<Self, _>(#constructor)
        },
        None => quote! {
            ::di_abstractions::TypeDescriptor::from_default::<Self>()
        },
    };

    let handles = args.handles.iter().map(|command| {
        quote! { .implements(::event_sourcing::handles::<Self, #command>()) }
    });
    let capabilities = args.capabilities.iter().map(|capability| {
        quote! { .implements(#capability) }
    });

    Ok(quote! {
        impl ::di_abstractions::Describe for #name {
            fn describe() -> ::di_abstractions::TypeDescriptor {
                #base
                    #(#handles)*
                    #(#capabilities)*
            }
        }
    })
}
