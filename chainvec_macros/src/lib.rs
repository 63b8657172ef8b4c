//! Procedural macros for the chainvec test suites. They couple tightly
//! to the harness items in scope at the invocation site and are NOT
//! general purpose.

use syn::parse_macro_input;

mod testing;

extern crate proc_macro;

/// Expands a comma-separated list of `group::name` script paths into
/// one `#[test]` function each, every one calling
/// `test_script("group/name")` on the harness in scope.
#[proc_macro]
pub fn declare_output_tests(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
  let suite = parse_macro_input!(input as testing::ScriptSuite);
  proc_macro::TokenStream::from(suite.into_test_impl())
}
