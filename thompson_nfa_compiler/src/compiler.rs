use crate::{
    nfa::{Fragment, Hole, Predicate, StateId, NFA, UNPATCHED},
    CompileError, CompileResult,
};
use regeng_syntax::Ast;

/// Compiler that converts a parsed pattern to a Thompson NFA
#[derive(Debug)]
pub struct Compiler {
    nfa: NFA,
    size_limit: Option<usize>,
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self { nfa: NFA::new(), size_limit: None }
    }

    /// Limit the number of states the compiled NFA may have.
    ///
    /// `None` (the default) means compilation never fails.
    pub fn size_limit(mut self, limit: Option<usize>) -> Self {
        self.size_limit = limit;
        self
    }

    /// Compile an AST to a Thompson NFA
    pub fn compile(mut self, ast: &Ast) -> CompileResult<NFA> {
        let fragment = self.compile_ast(ast)?;

        // Every remaining hole leads to the single match state.
        let match_state = self.add(|nfa| nfa.match_state())?;
        self.nfa.patch(&fragment.holes, match_state);
        self.nfa.start = fragment.start;
        debug_assert!(self.nfa.is_complete(), "dangling transition: {:?}", self.nfa);

        debug!(
            "compiled {} into an NFA with {} states",
            ast,
            self.nfa.len()
        );
        Ok(self.nfa)
    }

    /// Compile an AST node to an NFA fragment
    fn compile_ast(&mut self, ast: &Ast) -> CompileResult<Fragment> {
        match *ast {
            Ast::Empty => self.compile_empty(),
            Ast::Literal(c) => self.compile_predicate(Predicate::Char(c)),
            Ast::Range(lo, hi) => self.compile_predicate(Predicate::Range(lo, hi)),
            Ast::Concat(ref items) => self.compile_concat(items),
            Ast::Union(ref items) => self.compile_union(items),
            Ast::Star(ref child) => self.compile_star(child),
            Ast::Plus(ref child) => self.compile_plus(child),
            Ast::Optional(ref child) => self.compile_optional(child),
            Ast::Group(ref child) => self.compile_ast(child),
        }
    }

    /// Compile empty match: one epsilon whose target dangles
    fn compile_empty(&mut self) -> CompileResult<Fragment> {
        let start = self.add(|nfa| nfa.epsilon(UNPATCHED))?;
        Ok(Fragment { start, holes: vec![Hole::out1(start)] })
    }

    /// Compile a single consuming transition
    fn compile_predicate(&mut self, pred: Predicate) -> CompileResult<Fragment> {
        let start = self.add(|nfa| nfa.consume(pred))?;
        Ok(Fragment { start, holes: vec![Hole::out1(start)] })
    }

    /// Each item's holes lead into the next item
    fn compile_concat(&mut self, items: &[Ast]) -> CompileResult<Fragment> {
        let Some((first, rest)) = items.split_first() else {
            return self.compile_empty();
        };
        let mut concat = self.compile_ast(first)?;
        for item in rest {
            let next = self.compile_ast(item)?;
            self.nfa.patch(&concat.holes, next.start);
            concat.holes = next.holes;
        }
        Ok(concat)
    }

    /// One split per additional branch, folded from the left. Every branch
    /// keeps its own holes.
    fn compile_union(&mut self, items: &[Ast]) -> CompileResult<Fragment> {
        let Some((first, rest)) = items.split_first() else {
            return self.compile_empty();
        };
        let mut union = self.compile_ast(first)?;
        for item in rest {
            let next = self.compile_ast(item)?;
            let left = union.start;
            union.start = self.add(|nfa| nfa.split(left, next.start))?;
            union.holes.extend(next.holes);
        }
        Ok(union)
    }

    /// A split that either enters the child or bypasses it; the child loops
    /// back to the split
    fn compile_star(&mut self, child: &Ast) -> CompileResult<Fragment> {
        let child = self.compile_ast(child)?;
        let split = self.loop_back(&child)?;
        Ok(Fragment { start: split, holes: vec![Hole::out2(split)] })
    }

    /// The child once, then the same loop as `*`. This is `Concat(c, Star(c))`
    /// without compiling the child twice.
    fn compile_plus(&mut self, child: &Ast) -> CompileResult<Fragment> {
        let child = self.compile_ast(child)?;
        let split = self.loop_back(&child)?;
        Ok(Fragment { start: child.start, holes: vec![Hole::out2(split)] })
    }

    /// A split that either enters the child or bypasses it
    fn compile_optional(&mut self, child: &Ast) -> CompileResult<Fragment> {
        let mut child = self.compile_ast(child)?;
        let split = self.add(|nfa| nfa.split(child.start, UNPATCHED))?;
        child.holes.push(Hole::out2(split));
        Ok(Fragment { start: split, holes: child.holes })
    }

    /// Add a split re-entering `child` and patch the child's holes to it.
    /// The split's bypass is left unpatched.
    fn loop_back(&mut self, child: &Fragment) -> CompileResult<StateId> {
        let split = self.add(|nfa| nfa.split(child.start, UNPATCHED))?;
        self.nfa.patch(&child.holes, split);
        Ok(split)
    }

    /// Add a state through `f` after checking the size limit.
    fn add(&mut self, f: impl FnOnce(&mut NFA) -> StateId) -> CompileResult<StateId> {
        if let Some(limit) = self.size_limit {
            if self.nfa.len() >= limit {
                return Err(CompileError::TooComplex { limit });
            }
        }
        Ok(f(&mut self.nfa))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile an AST with the default configuration.
pub fn compile(ast: &Ast) -> CompileResult<NFA> {
    Compiler::new().compile(ast)
}
