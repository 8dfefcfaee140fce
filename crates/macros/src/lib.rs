//! Procedural macros used by `kzprofile`'s test suite.

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;
use syn::parse::Nothing;
use syn::{parse_macro_input, ItemFn};


/// Run an integration test.
///
/// # Test Setup
///
/// This macro generates the boilerplate necessary for running **integration tests**. Every test
/// gets its own API instance, backed by its own fake upstream server that serves a fixed dataset.
/// Your test function should have the following signature:
///
/// ```rust,ignore
/// async fn my_test(ctx: &Context);
/// ```
///
/// Every test implicitly has a return type of `anyhow::Result<()>` and returns `Ok(())` as the
/// default case, which means you don't need to specify either of them.
///
/// The `Context` parameter can be used to make requests to the API, using the `http_client`
/// field and `Context::url()` method.
#[proc_macro_error]
#[proc_macro_attribute]
pub fn integration_test(args: TokenStream, test_function: TokenStream) -> TokenStream {
	parse_macro_input!(args as Nothing);

	let test_function = parse_macro_input!(test_function as ItemFn);

	match integration_test::expand(test_function) {
		Ok(tokens) => tokens,
		Err(error) => error.into_compile_error().into(),
	}
}

macro_rules! error {
	($span:expr, $($message:tt)*) => {
		return Err(syn::Error::new($span.span(), format_args!($($message)*)));
	};
}

pub(crate) use error;
