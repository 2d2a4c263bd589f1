//! Post-pass call validation.
//!
//! Every call is recorded on the scope it was lowered in. Once the whole
//! program is lowered, each recorded call is resolved by name from its own
//! scope outwards and checked against the signature it finds: same number
//! of arguments, and each argument whose type is known has the parameter's
//! type. A call to a name with no visible definition is accepted.
//!
//! By default only the calls recorded on the ancestor chain of the scope
//! generation ended in (the top level) are checked. With
//! [`CodegenConfig::validate_nested_calls`] every scope is checked.

use tracing::debug;

use crate::error::{InvalidCall, InvalidCallReason};
use crate::scope::{CallSite, ScopeId, ScopeTree, Signature};
use crate::CodegenConfig;

/// Check recorded calls, returning the first that does not match.
#[tracing::instrument(level = "debug", skip_all, fields(scopes = scopes.len()))]
pub fn validate_calls(scopes: &ScopeTree, config: &CodegenConfig) -> Result<(), InvalidCall> {
    if config.validate_nested_calls {
        check_scopes(scopes, scopes.iter().map(|(id, _)| id))
    } else {
        check_scopes(scopes, scopes.ancestors(scopes.current()).map(|(id, _)| id))
    }
}

fn check_scopes(
    scopes: &ScopeTree,
    ids: impl Iterator<Item = ScopeId>,
) -> Result<(), InvalidCall> {
    for id in ids {
        for call in scopes.get(id).calls() {
            let Some(signature) = scopes.lookup_function(id, &call.name) else {
                debug!(name = %call.name, "call to an undefined function accepted");
                continue;
            };
            if let Err(reason) = check_call(signature, call) {
                return Err(InvalidCall {
                    name: call.name.clone(),
                    position: call.position,
                    definition: signature.position,
                    reason,
                });
            }
        }
    }
    Ok(())
}

/// Compare one call site with a signature.
pub fn check_call(signature: &Signature, call: &CallSite) -> Result<(), InvalidCallReason> {
    if signature.params.len() != call.arg_types.len() {
        return Err(InvalidCallReason::Arity {
            expected: signature.params.len(),
            found: call.arg_types.len(),
        });
    }
    for (index, (&expected, &found)) in signature.params.iter().zip(&call.arg_types).enumerate() {
        if let Some(found) = found {
            if found != expected {
                return Err(InvalidCallReason::ArgumentType {
                    index,
                    expected,
                    found,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bc_ir::{Position, TypeName};
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    use super::*;
    use crate::scope::ScopeKind;

    fn signature(params: &[TypeName]) -> Signature {
        Signature {
            params: params.iter().copied().collect(),
            return_ty: TypeName::Int,
            position: Position::new(1, 1),
        }
    }

    fn call(name: &str, arg_types: &[Option<TypeName>]) -> CallSite {
        CallSite {
            name: name.into(),
            arg_types: arg_types.iter().copied().collect(),
            position: Position::new(3, 1),
        }
    }

    #[test]
    fn test_check_call_arity() {
        let sig = signature(&[TypeName::Int]);
        assert_eq!(
            check_call(&sig, &call("f", &[Some(TypeName::Int), Some(TypeName::Int)])),
            Err(InvalidCallReason::Arity {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_check_call_types() {
        let sig = signature(&[TypeName::Int, TypeName::String]);
        assert_eq!(
            check_call(&sig, &call("f", &[Some(TypeName::Int), Some(TypeName::Int)])),
            Err(InvalidCallReason::ArgumentType {
                index: 1,
                expected: TypeName::String,
                found: TypeName::Int,
            })
        );
        assert_eq!(
            check_call(&sig, &call("f", &[Some(TypeName::Int), Some(TypeName::String)])),
            Ok(())
        );
    }

    #[test]
    fn test_unknown_argument_types_match_anything() {
        let sig = signature(&[TypeName::String]);
        assert_eq!(check_call(&sig, &call("f", &[None])), Ok(()));
    }

    #[test]
    fn test_undefined_functions_are_accepted() {
        let mut tree = ScopeTree::new();
        tree.record_call(call("missing", &[]));
        assert_eq!(validate_calls(&tree, &CodegenConfig::default()), Ok(()));
    }

    #[test]
    fn test_nested_calls_need_the_flag() {
        let mut tree = ScopeTree::new();
        tree.define_function("f", signature(&[]));
        tree.enter(ScopeKind::Block, 0);
        tree.record_call(CallSite {
            name: "f".into(),
            arg_types: smallvec![Some(TypeName::Int)],
            position: Position::new(2, 3),
        });
        tree.exit();

        assert_eq!(validate_calls(&tree, &CodegenConfig::default()), Ok(()));

        let strict = CodegenConfig {
            validate_nested_calls: true,
        };
        let err = validate_calls(&tree, &strict).unwrap_err();
        assert_eq!(err.name, "f");
        assert_eq!(err.position, Position::new(2, 3));
        assert_eq!(err.definition, Position::new(1, 1));
    }
}
