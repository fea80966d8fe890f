use indexmap::IndexSet;
use log::{debug, trace, warn};
use mangekyou_span::{IntoDiagnostic, Located, Report, Span};
use mangekyou_tree::{
    BinaryExpr, CallExpr, Expr, Function, IfExpr, Item, LetExpr, Program, Prototype, Symbol,
};

use crate::{
    env::{BoundVars, TypeConEnv, TypeEnv},
    error::{TypeError, TypeErrors},
    kind::Kind,
    options::TyperOptions,
    substitute::{Substitutable, Substitution},
    supply::TypeVarGen,
    types::{Scheme, Type, TypeVar},
    unify::unify,
};

pub type InferResult<T> = Result<T, Located<TypeError>>;

// ∆ = Kind Environment (constructors)
// Γ = Type Environment
//
// Every rule returns the substitution it discovered together with the inferred
// type, which already has that substitution applied.

/// Algorithm W over one program.
pub struct Typer<'a> {
    options: &'a TyperOptions,
    cons: &'a TypeConEnv,
    generator: TypeVarGen,
}

impl<'a> Typer<'a> {
    pub fn new(options: &'a TyperOptions, cons: &'a TypeConEnv) -> Self {
        Self {
            options,
            cons,
            generator: TypeVarGen::new(),
        }
    }

    fn fresh(&self) -> Type {
        Type::Var(self.generator.fresh_var(Kind::Star))
    }

    fn unify_at(&self, expected: &Type, actual: &Type, span: Span) -> InferResult<Substitution> {
        unify(expected, actual).map_err(|err| (err.into(), span))
    }

    fn lookup_star(&self, name: &str, span: Span) -> InferResult<Type> {
        self.cons.lookup_star(name).map_err(|err| (err, span))
    }

    fn lookup_var(&self, env: &TypeEnv, name: &Symbol, span: Span) -> InferResult<Type> {
        let scheme = env
            .get(name)
            .ok_or_else(|| (TypeError::Unbound(name.clone()), span))?;

        Ok(scheme.instantiate(&self.generator))
    }

    pub fn infer_expr(&self, env: &TypeEnv, expr: &Expr) -> InferResult<(Substitution, Type)> {
        let (s, t) = match expr {
            Expr::Num(_) => (Substitution::empty(), Type::num()),
            Expr::Bool(_) => (Substitution::empty(), Type::bool()),
            Expr::Var(var) => (
                Substitution::empty(),
                self.lookup_var(env, &var.name, var.span)?,
            ),
            Expr::Call(call) => self.infer_call(env, call)?,
            Expr::Binary(binary) => self.infer_binary(env, binary)?,
            Expr::Let(let_) => self.infer_let(env, let_)?,
            Expr::If(if_) => self.infer_if(env, if_)?,
        };

        trace!("INFER: {t} at {}", expr.span());
        Ok((s, t))
    }

    /// Infers every argument from left to right, threading the substitution.
    fn infer_args(
        &self,
        env: &TypeEnv,
        args: &[Expr],
    ) -> InferResult<(Substitution, Vec<Type>)> {
        let mut s = Substitution::empty();
        let mut types = Vec::with_capacity(args.len());

        for arg in args {
            let (s_arg, arg_t) = self.infer_expr(&env.apply(&s), arg)?;
            s = s_arg.compose(&s);
            types.push(arg_t);
        }

        Ok((s, types))
    }

    /// Rule for Function Call
    ///
    /// ```text
    /// Γ(callee) = σ    callee_t = inst(σ)
    /// ∆;Γ ⊢ arg_i : arg_i_t
    /// result_t = newvar()
    /// unify(callee_t, arg_1_t → .. → arg_n_t → result_t)
    /// -----------------------
    /// ∆;Γ ⊢ callee(arg_1, .., arg_n) : result_t
    /// ```
    ///
    /// A call without arguments passes `Unit`.
    fn infer_call(&self, env: &TypeEnv, call: &CallExpr) -> InferResult<(Substitution, Type)> {
        let CallExpr { callee, args, span } = call;

        let callee_t = self.lookup_var(env, callee, *span)?;
        let (s, arg_ts) = self.infer_args(env, args)?;

        let result_t = self.fresh();
        let expected = Type::func_n(arg_ts, result_t.clone());

        let s_call = self.unify_at(&callee_t.apply(&s), &expected.apply(&s), *span)?;
        let s = s_call.compose(&s);

        Ok((s.clone(), result_t.apply(&s)))
    }

    /// Rule for Binary Expression
    ///
    /// ```text
    /// sig(op) = lhs_t → rhs_t → out_t
    /// ∆;Γ ⊢ lhs : lhs_t
    /// ∆;Γ ⊢ rhs : rhs_t
    /// -----------------------
    /// ∆;Γ ⊢ lhs op rhs : out_t
    /// ```
    fn infer_binary(
        &self,
        env: &TypeEnv,
        binary: &BinaryExpr,
    ) -> InferResult<(Substitution, Type)> {
        let BinaryExpr { op, lhs, rhs, span } = binary;

        let sig = self
            .options
            .operator(*op)
            .ok_or((TypeError::UnknownOperator(*op), *span))?;

        let expected_lhs = self.lookup_star(&sig.lhs, *span)?;
        let expected_rhs = self.lookup_star(&sig.rhs, *span)?;
        let output = self.lookup_star(&sig.output, *span)?;

        let (s1, lhs_t) = self.infer_expr(env, lhs)?;
        let s_lhs = self.unify_at(&expected_lhs, &lhs_t, lhs.span())?;
        let s = s_lhs.compose(&s1);

        let (s2, rhs_t) = self.infer_expr(&env.apply(&s), rhs)?;
        let s = s2.compose(&s);
        let s_rhs = self.unify_at(&expected_rhs, &rhs_t.apply(&s), rhs.span())?;

        Ok((s_rhs.compose(&s), output))
    }

    /// Rule for Let Expression
    ///
    /// ```text
    /// ∆;Γ ⊢ value : value_t
    /// ∆;Γ, name : Γ'(value_t) ⊢ body : body_t
    /// -----------------------
    /// ∆;Γ ⊢ let name = value in body : body_t
    /// ```
    ///
    /// The value is generalized, so each use of `name` in the body
    /// gets its own instantiation.
    fn infer_let(&self, env: &TypeEnv, let_: &LetExpr) -> InferResult<(Substitution, Type)> {
        let LetExpr {
            name, value, body, ..
        } = let_;

        let (s1, value_t) = self.infer_expr(env, value)?;
        let env = env.apply(&s1);

        let scheme = Scheme::generalize(&env.bound_vars(), &value_t);

        let (s2, body_t) = self.infer_expr(&env.with(name.clone(), scheme), body)?;

        Ok((s2.compose(&s1), body_t))
    }

    /// Rule for If Expression
    ///
    /// ```text
    /// ∆;Γ ⊢ predicate : predicate_t
    /// ∆;Γ ⊢ then : then_t
    /// ∆;Γ ⊢ or : or_t
    /// unify(predicate_t, Bool)
    /// unify(then_t, or_t)
    /// -----------------------
    /// ∆;Γ ⊢ if predicate then then else or : then_t
    /// ```
    fn infer_if(&self, env: &TypeEnv, if_: &IfExpr) -> InferResult<(Substitution, Type)> {
        let IfExpr {
            predicate,
            then,
            or,
            span,
        } = if_;

        let (s1, predicate_t) = self.infer_expr(env, predicate)?;
        let s_pred = self.unify_at(&Type::bool(), &predicate_t, predicate.span())?;
        let s = s_pred.compose(&s1);

        let (s2, then_t) = self.infer_expr(&env.apply(&s), then)?;
        let s = s2.compose(&s);

        let (s3, or_t) = self.infer_expr(&env.apply(&s), or)?;
        let s = s3.compose(&s);

        let s_branch = self.unify_at(&then_t.apply(&s), &or_t, *span)?;
        let s = s_branch.compose(&s);

        Ok((s.clone(), then_t.apply(&s)))
    }

    /// Rule for Function Definition
    ///
    /// ```text
    /// param_i_t = newvar()    result_t = newvar()
    /// f_t = param_1_t → .. → param_n_t → result_t
    /// ∆;Γ, f : f_t, param_i : param_i_t ⊢ body : body_t
    /// unify(result_t, body_t)
    /// -----------------------
    /// ∆;Γ ⊢ f(param_1, .., param_n) = body : Γ'(f_t)
    /// ```
    ///
    /// Recursive uses of `f` are monomorphic. Parameters shadow the function name.
    pub fn infer_function(&self, env: &TypeEnv, function: &Function) -> InferResult<Scheme> {
        let Function { proto, body, span } = function;

        let param_ts = proto.params.iter().map(|_| self.fresh()).collect::<Vec<_>>();
        let result_t = self.fresh();
        let function_t = Type::func_n(param_ts.clone(), result_t.clone());

        let mut inner = if proto.is_top_level() {
            env.clone()
        } else {
            env.with(proto.name.clone(), Scheme::mono(function_t.clone()))
        };
        for (param, param_t) in proto.params.iter().zip(param_ts) {
            inner.insert(param.clone(), Scheme::mono(param_t));
        }

        let (s, body_t) = self.infer_expr(&inner, body)?;
        let s_result = self.unify_at(&result_t.apply(&s), &body_t, *span)?;
        let s = s_result.compose(&s);

        let bound = env.apply(&s).bound_vars();

        if proto.is_top_level() {
            return Ok(Scheme::generalize(&bound, &result_t.apply(&s)));
        }

        Ok(Scheme::generalize(&bound, &function_t.apply(&s)))
    }

    /// Every parameter and the result of an extern have the configured type.
    pub fn infer_extern(&self, proto: &Prototype) -> InferResult<Scheme> {
        let ty = self.lookup_star(&self.options.extern_type, proto.span)?;
        let param_ts = vec![ty.clone(); proto.params.len()];

        Ok(Scheme::mono(Type::func_n(param_ts, ty)))
    }

    pub fn infer_item(&self, env: &TypeEnv, item: &Item) -> InferResult<Scheme> {
        match item {
            Item::Function(function) | Item::TopLevel(function) => {
                self.infer_function(env, function)
            }
            Item::Extern(proto) => self.infer_extern(proto),
        }
    }

    /// Checks the items in order, binding every named declaration for the ones that follow.
    pub fn check_program(&self, program: &Program) -> CheckedProgram {
        let mut checked = CheckedProgram::default();

        for item in &program.items {
            let name = item.name();
            let is_top_level = matches!(item, Item::TopLevel(_));

            match self.infer_item(&checked.env, item) {
                Ok(scheme) => {
                    debug!("CHECKED: {name} : {scheme}");

                    if is_top_level {
                        checked.top_level.push((scheme, item.span()));
                    } else {
                        checked.env.insert(name.clone(), scheme);
                    }
                }
                Err((err, span)) => {
                    debug!("FAILED: {name}: {err}");

                    if !is_top_level {
                        checked.env.insert(name.clone(), Scheme::any());
                    }
                    checked.errors.push((err, span));

                    if !self.options.continue_on_error {
                        break;
                    }
                    if self.options.limit_reached(checked.errors.len()) {
                        warn!("stopped after {} errors", checked.errors.len());
                        break;
                    }
                }
            }
        }

        checked
    }
}

/// Checks `program` with the builtin constructors.
pub fn check(program: &Program, options: &TyperOptions) -> CheckedProgram {
    let cons = TypeConEnv::builtin();
    Typer::new(options, &cons).check_program(program)
}

/// Outcome of checking a whole program.
#[derive(Debug, Clone, Default)]
pub struct CheckedProgram {
    /// Schemes of the named declarations, failed ones are bound to `forall a. a`.
    pub env: TypeEnv,
    /// Types of the anonymous top level expressions.
    pub top_level: Vec<Located<Scheme>>,
    pub errors: TypeErrors,
}

impl CheckedProgram {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Free type variables left in the environment.
    pub fn unresolved(&self) -> IndexSet<TypeVar> {
        self.env.bound_vars()
    }

    pub fn report(&self) -> Report {
        let mut report = Report::new();

        for (err, span) in self.errors.iter().cloned() {
            report.add_diagnostic(err.into_diagnostic(span));
        }

        report
    }
}
