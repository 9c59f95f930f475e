//! Runs the type equivalence engine and the description heuristic over the
//! `@return` entry and each `@param` entry of one callable.

use super::description::{DescriptionHeuristic, RestatementHeuristic};
use super::type_equivalence::{is_union_match, TypeEquivalence};
use crate::core::{
    AnnotationField, Decision, DocumentationView, ParameterSignature, SignatureView,
    TypeExpression,
};
use tracing::{debug, trace_span};

/// What the parameter pass does after deciding one parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamStep {
    Next(Decision),
    /// Remove this entry and leave the remaining parameters untouched.
    Halt,
}

#[derive(Clone, Debug, Default)]
pub struct RedundancyCoordinator<H = RestatementHeuristic> {
    equivalence: TypeEquivalence,
    heuristic: H,
}

impl RedundancyCoordinator<RestatementHeuristic> {
    pub fn new(equivalence: TypeEquivalence) -> Self {
        Self::with_heuristic(equivalence, RestatementHeuristic)
    }
}

impl<H: DescriptionHeuristic> RedundancyCoordinator<H> {
    pub fn with_heuristic(equivalence: TypeEquivalence, heuristic: H) -> Self {
        Self {
            equivalence,
            heuristic,
        }
    }

    /// Removes every redundant `@return` / `@param` entry from `doc`.
    ///
    /// Never fails: missing types or descriptions simply keep the entry.
    pub fn process<S, D>(&self, signature: &S, doc: &mut D)
    where
        S: SignatureView + ?Sized,
        D: DocumentationView + ?Sized,
    {
        let _span = trace_span!("process_callable").entered();

        if self.decide_return(signature, &*doc) == Decision::Remove {
            debug!("removing redundant @return");
            doc.remove_return_type();
        }

        self.process_params(signature, doc);
    }

    pub fn decide_return<S, D>(&self, signature: &S, doc: &D) -> Decision
    where
        S: SignatureView + ?Sized,
        D: DocumentationView + ?Sized,
    {
        let Some(field) = doc.return_field() else {
            return Decision::Keep;
        };
        let declared = TypeExpression::from_optional(signature.return_type());

        self.decide_return_field(declared.as_ref(), &field)
    }

    fn decide_return_field(
        &self,
        declared: Option<&TypeExpression>,
        field: &AnnotationField,
    ) -> Decision {
        let documented = field.documented_type.as_ref();

        if self.equivalence.types_are_redundant(declared, documented) {
            return Decision::remove_unless(field.has_description());
        }

        let (Some(declared), Some(documented)) = (declared, documented) else {
            return Decision::Keep;
        };

        if declared.is_union()
            && documented.is_union()
            && is_union_match(declared, documented)
            && !field.has_description()
        {
            return Decision::Remove;
        }

        if declared.ends_with_namespaced(&documented.raw_text) {
            return Decision::Remove;
        }

        if self.equivalence.is_alias_match(declared, documented) {
            return Decision::Remove;
        }

        Decision::Keep
    }

    fn process_params<S, D>(&self, signature: &S, doc: &mut D)
    where
        S: SignatureView + ?Sized,
        D: DocumentationView + ?Sized,
    {
        for parameter in signature.parameters() {
            let Some(field) = doc.param_field(&parameter.name) else {
                continue;
            };

            match self.decide_param(&parameter, &field) {
                ParamStep::Next(Decision::Keep) => {}
                ParamStep::Next(Decision::Remove) => {
                    debug!(param = %parameter.name, "removing redundant @param");
                    doc.remove_param_type(&parameter.name);
                }
                ParamStep::Halt => {
                    // TODO: decide whether to continue instead; later parameters
                    // are currently only reached on a second run.
                    debug!(param = %parameter.name, "removing redundant @param, skipping the rest");
                    doc.remove_param_type(&parameter.name);
                    break;
                }
            }
        }
    }

    pub fn decide_param(&self, parameter: &ParameterSignature, field: &AnnotationField) -> ParamStep {
        // `@param Foo Foo`-style entries, or ones with neither type nor text
        if field.documented_raw() == field.description.as_deref() {
            return ParamStep::Next(Decision::Remove);
        }

        let (Some(documented), Some(description)) =
            (field.documented_type.as_ref(), field.description.as_deref())
        else {
            return ParamStep::Next(Decision::Keep);
        };

        let useful = self.heuristic.is_useful(
            description,
            Some(&documented.raw_text),
            Some(&parameter.name),
        );

        if parameter.declared_raw() == Some(documented.raw_text.as_str()) {
            return ParamStep::Next(Decision::remove_unless(!description.is_empty() && useful));
        }

        let Some(declared) = parameter.declared_type.as_ref() else {
            return ParamStep::Next(Decision::Keep);
        };

        if documented.ends_with_namespaced(&declared.raw_text)
            || declared.ends_with_namespaced(&documented.raw_text)
        {
            return if useful {
                ParamStep::Next(Decision::Keep)
            } else {
                ParamStep::Halt
            };
        }

        if self.equivalence.is_alias_match(declared, documented) {
            return ParamStep::Next(Decision::Remove);
        }

        ParamStep::Next(Decision::Keep)
    }
}
