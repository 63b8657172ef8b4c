use proc_macro2::{Ident, Literal, Span};
use quote::quote;
use syn::parse::Parse;

/// One `group::name` path naming a driver script relative to the
/// harness's script root.
pub struct Script {
  path: syn::Path,
}

impl Parse for Script {
  fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
    let path = syn::Path::parse(input)?;
    Ok(Self { path })
  }
}

impl Script {
  pub fn into_test_fn_impl(self) -> proc_macro2::TokenStream {
    let components: Vec<_> = self
      .path
      .segments
      .into_iter()
      .map(|segment| segment.ident.to_string())
      .collect();
    let test_fn_name = components.join("_");
    let script_path = components.join("/");
    let test_fn_ident = Ident::new(&test_fn_name, Span::call_site());
    let script_lit = Literal::string(&script_path);

    quote! {
      #[test]
      fn #test_fn_ident() {
        test_script(#script_lit);
      }
    }
  }
}

pub struct ScriptSuite {
  scripts: Vec<Script>,
}

impl Parse for ScriptSuite {
  fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
    let scripts = input
      .parse_terminated(Script::parse, syn::Token![,])?
      .into_iter()
      .collect();
    Ok(Self { scripts })
  }
}

impl ScriptSuite {
  pub fn into_test_impl(self) -> proc_macro2::TokenStream {
    let tests = self.scripts.into_iter().map(Script::into_test_fn_impl);
    quote! {
      #(#tests)*
    }
  }
}
