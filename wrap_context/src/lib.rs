use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{
    parse_macro_input, Expr,
    Member::{Named, Unnamed},
};

/// Use this instead of `anyhow::anyhow!()`.
///
/// The message is prefixed with the caller location.
#[proc_macro]
pub fn wohyna(input: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(input);

    let output = quote! {
        {
            use anyhow::anyhow;

            let loc = std::panic::Location::caller();

            anyhow!(
                "[{}:{}:{}] {}",
                loc.file(),
                loc.line(),
                loc.column(),
                format!(#args)
            )
        }
    };

    output.into()
}

/// Use this instead of `anyhow::bail!()`
#[proc_macro]
pub fn liab(input: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(input);

    let output = quote! {
        {
            use anyhow::bail;

            let loc = std::panic::Location::caller();

            bail!(
                "[{}:{}:{}] {}",
                loc.file(),
                loc.line(),
                loc.column(),
                format!(#args)
            )
        }
    };

    output.into()
}

/// Attaches the caller location and a rendering of the wrapped expression,
/// arguments included, to the error of a `Result` or the `None` of an `Option`.
///
/// Arguments are rendered with `Debug` inside the error closure, so they must
/// still be alive after the wrapped expression has been evaluated.
#[proc_macro]
pub fn arg_context(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);

    let result = describe_expr(&expr, true);

    let output = quote! {
        {
            use anyhow::Context;

            let loc = std::panic::Location::caller();

            #expr.with_context(|| {
                format!(
                    "[{}:{}:{}] {}",
                    loc.file(),
                    loc.line(),
                    loc.column(),
                    #result
                )
            })
        }
    };

    output.into()
}

/// Same as `arg_context!()`, but the arguments are replaced with `?`.
#[proc_macro]
pub fn raw_context(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);

    let result = describe_expr(&expr, false);

    let output = quote! {
        {
            use anyhow::Context;

            let loc = std::panic::Location::caller();

            #expr.with_context(|| {
                format!(
                    "[{}:{}:{}] {}",
                    loc.file(),
                    loc.line(),
                    loc.column(),
                    #result
                )
            })
        }
    };

    output.into()
}

fn describe_expr(expr: &Expr, print_args: bool) -> proc_macro2::TokenStream {
    match expr {
        Expr::Call(call) => {
            let func_name = describe_expr(&call.func, print_args);

            if print_args {
                let arg_to_string_iter = call.args.iter().map(debug_arg);

                quote! {
                    {
                        let args_list = <Vec<String>>::from([#(#arg_to_string_iter),*]).join(", ");
                        format!("{}({})", #func_name, args_list)
                    }
                }
            } else {
                quote! {
                    {
                        format!("{}(?)", #func_name)
                    }
                }
            }
        }
        Expr::MethodCall(method) => {
            let receiver_name = describe_expr(&method.receiver, print_args);
            let method_name = method.method.to_string();

            if print_args {
                let arg_to_string_iter = method.args.iter().map(debug_arg);

                quote! {
                    {
                        let args_list = <Vec<String>>::from([#(#arg_to_string_iter),*]).join(", ");
                        format!(
                            "{}.{}({})",
                            #receiver_name,
                            #method_name,
                            args_list
                        )
                    }
                }
            } else {
                quote! {
                    {
                        format!(
                            "{}.{}(?)",
                            #receiver_name,
                            #method_name
                        )
                    }
                }
            }
        }
        Expr::Path(path) => {
            let path = path
                .to_token_stream()
                .to_string()
                .replace(" :: ", "::")
                .replace(" . ", ".");
            quote!(format!("{}", #path))
        }
        Expr::Field(field) => {
            let base_name = describe_expr(&field.base, print_args);
            let member_name = match &field.member {
                Named(ident) => ident.to_token_stream().to_string(),
                Unnamed(index) => index.index.to_string(),
            };

            quote!(format!("{}.{}", #base_name, #member_name))
        }
        Expr::Await(aw) => {
            let base_name = describe_expr(&aw.base, print_args);

            quote!(format!("{}.await", #base_name))
        }
        Expr::Macro(ma) => {
            let path = ma
                .mac
                .path
                .to_token_stream()
                .to_string()
                .replace(" :: ", "::")
                .replace(" . ", ".");
            let tokens = ma.mac.tokens.to_token_stream().to_string();

            quote! {
                {
                    format!(
                        "{}!({})",
                        #path,
                        #tokens
                    )
                }
            }
        }
        Expr::Try(tr) => {
            let inner = describe_expr(&tr.expr, print_args);

            quote! {
                {
                    format!(
                        "{}",
                        #inner
                    )
                }
            }
        }
        Expr::Paren(paren) => {
            let inner = describe_expr(&paren.expr, print_args);

            quote!(format!("({})", #inner))
        }
        Expr::Reference(reference) => {
            let inner = describe_expr(&reference.expr, print_args);
            let prefix = if reference.mutability.is_some() {
                "&mut "
            } else {
                "&"
            };

            quote!(format!("{}{}", #prefix, #inner))
        }
        Expr::Index(index) => {
            let base_name = describe_expr(&index.expr, print_args);
            let index_tokens = index.index.to_token_stream().to_string();

            quote!(format!("{}[{}]", #base_name, #index_tokens))
        }
        Expr::Lit(lit) => {
            let literal = lit.to_token_stream().to_string();

            quote!(format!("{}", #literal))
        }
        _ => syn::Error::new_spanned(expr, format!("Unexpected expression in macro: {:#?}", expr))
            .to_compile_error()
            .into(),
    }
}

/// The binary and the library both expose `utils::{clip_string, DEBUG_PRINT_LIMIT}`
/// at their roots, which is what the generated code refers to.
fn debug_arg(arg: &Expr) -> proc_macro2::TokenStream {
    quote!(crate::utils::clip_string(
        format!("{:?}", #arg),
        "…",
        *crate::utils::DEBUG_PRINT_LIMIT.get().unwrap_or(&1)
    ))
}
