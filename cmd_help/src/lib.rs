use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, parse_macro_input};

/// 提取文档注释，每行去掉`///`后紧跟的一个空格，保留后续缩进。
fn extract_doc(attrs: &[syn::Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("doc")
            && let syn::Meta::NameValue(nv) = &attr.meta
            && let syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(s), .. }) = &nv.value
        {
            let line = s.value();
            lines.push(line.strip_prefix(' ').map(str::to_owned).unwrap_or(line));
        }
    }
    lines.join("\n")
}

#[proc_macro_derive(CmdHelp)]
pub fn cmd_help_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = &input.ident;

    let Data::Enum(DataEnum { variants, .. }) = &input.data else {
        panic!("CmdHelp can only be derived on enums");
    };

    // 1. help(&self)：当前变体的帮助
    let help_entries = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let doc = extract_doc(&v.attrs);
        let pattern = match &v.fields {
            Fields::Unit => quote! { #variant_name },
            Fields::Unnamed(_) => quote! { #variant_name(..) },
            Fields::Named(_) => quote! { #variant_name { .. } },
        };
        quote! {
            Self::#pattern => #doc,
        }
    });

    // 2. help_text()：按声明顺序拼接所有有文档的变体，忽略无文档的变体
    let docs = variants.iter().map(|v| extract_doc(&v.attrs)).filter(|doc| !doc.is_empty()).collect::<Vec<_>>();
    let help_text = docs.join("\n");

    let expanded = quote! {
        impl #enum_name {
            /// 获取帮助信息。
            pub fn help(&self) -> &'static str {
                match self {
                    #(#help_entries)*
                }
            }

            /// 获取全部帮助信息。
            pub fn help_text() -> &'static str {
                #help_text
            }
        }
    };

    TokenStream::from(expanded)
}
