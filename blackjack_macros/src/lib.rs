use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Ident, ImplItemFn};

/// This macro is added before a method of the `Table` struct in the impl block.
/// Use this macro to first check if the current phase is exactly the phase in
/// the attribute.
///
/// For example, `#[allowed_phase(Betting)]` will make a method first check
/// if the current phase is `Betting`. If not, the method returns
/// `GameError::WrongPhase` before touching any state.
///
/// The annotated method must return `Result<_, GameError>` and the struct must
/// keep its phase in a field called `phase`.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let phase = parse_macro_input!(attr as Ident);
    let mut ast = parse_macro_input!(item as ImplItemFn);
    let operation = ast.sig.ident.to_string();

    let guard = generate_phase_guard(&phase, &operation);
    let guard: syn::Stmt = match syn::parse2(guard) {
        Ok(stmt) => stmt,
        Err(err) => return err.to_compile_error().into(),
    };
    ast.block.stmts.insert(0, guard);
    ast.into_token_stream().into()
}

fn generate_phase_guard(phase: &Ident, operation: &str) -> TokenStream2 {
    quote! {
        if self.phase != crate::Phase::#phase {
            ::log::warn!("{} rejected during {:?} phase", #operation, self.phase);
            return Err(crate::GameError::WrongPhase {
                operation: #operation,
                expected: crate::Phase::#phase,
                actual: self.phase,
            });
        }
    }
}
