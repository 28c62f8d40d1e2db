//! Term rewriting for the MoSIS interview.
//!
//! Everything in here is a pure, deterministic string transform. Nothing
//! talks to the theory store; callers feed in inferred types where a rewrite
//! depends on them.
//!
//! - **`syntax`**: the store's surface syntax (delimiters, qualified names,
//!   include and assignment builders)
//! - **`ident`**: identifiers and yes/no answers
//! - **`typesig`**: structural checks on inferred type strings
//! - **`terms`**: equation splitting, binders, genericizing
//! - **`expand`**: inline parameter expansion

pub mod expand;
pub mod ident;
pub mod syntax;
pub mod terms;
pub mod typesig;

pub use expand::try_expand;
pub use ident::{first_word, means_no, parse_bool};
pub use syntax::{
    DECLARATION_DELIMITER, MODULE_DELIMITER, OBJECT_DELIMITER, add_object_delimiter, include,
    qualify, terminate_declaration, trivial_assignment, view_assignment, view_name,
    view_template_of,
};
pub use terms::{
    BOUND_VARIABLE, EquationKind, Sides, bind_variable, binder, evaluation_point, functionize,
    genericize, remove_apply_brackets, split_equation,
};
pub use typesig::{codomain_after, last_type, type_is_function_from, type_is_function_to};
