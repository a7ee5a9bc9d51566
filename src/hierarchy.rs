//! Module hierarchy recovered from a netlist, and leaf counting over it.

use crate::atom::Atom;
use crate::clean::strip_comments_and_attrs;
use crate::inst::{extract_instances, parse_inst_head};
use crate::module::extract_modules;
use crate::stmt::split_statements;
use crate::{Error, LeafCount, Options, Result};
use fxhash::{FxHashMap, FxHashSet};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// A single instance inside a module body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instantiation {
    pub ty: Atom,
    pub name: Atom,
    pub multiplicity: u64,
}

/// Modules of one netlist with their instantiations in statement order.
///
/// A type is a module exactly when it is a key of `modules`; every other
/// instantiated type is a leaf.
#[derive(Debug, Default)]
pub struct Hierarchy {
    modules: FxHashMap<Atom, Vec<Instantiation>>,
    used_types: FxHashSet<Atom>,
}

impl Hierarchy {
    /// Builds the hierarchy from raw netlist text.
    pub fn parse(text: &str) -> Result<Hierarchy> {
        let text = strip_comments_and_attrs(text);
        let spans = extract_modules(&text)?;

        let mut hier = Hierarchy::default();
        for span in &spans {
            let insts = hier.parse_body(span.body(&text));
            log::debug!("module `{}`: {} instances", span.name, insts.len());
            if hier.modules.insert(span.name.clone(), insts).is_some() {
                log::warn!(
                    "module `{}` defined more than once; keeping the last definition",
                    span.name
                );
            }
        }

        log::info!(
            "parsed {} modules, {} distinct instantiated types",
            hier.modules.len(),
            hier.used_types.len()
        );
        Ok(hier)
    }

    fn parse_body(&mut self, body: &str) -> Vec<Instantiation> {
        let mut insts = Vec::new();
        for stmt in split_statements(body) {
            let head = match parse_inst_head(stmt) {
                Some(head) => head,
                None => continue,
            };
            for decl in extract_instances(head.rest) {
                insts.push(Instantiation {
                    ty: head.ty.clone(),
                    multiplicity: decl.multiplicity(),
                    name: decl.name,
                });
                self.used_types.insert(head.ty.clone());
            }
        }
        insts
    }

    pub fn is_module(&self, name: &str) -> bool {
        self.modules.contains_key(&Atom::from(name))
    }

    /// All module names, sorted.
    pub fn module_names(&self) -> Vec<Atom> {
        let mut names: Vec<Atom> = self.modules.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn instantiations(&self, module: &Atom) -> &[Instantiation] {
        self.modules.get(module).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every type instantiated anywhere, module or leaf.
    pub fn used_types(&self) -> &FxHashSet<Atom> {
        &self.used_types
    }

    /// Instantiated types without a module definition, sorted.
    pub fn leaf_types(&self) -> Vec<Atom> {
        let mut leaves: Vec<Atom> = self
            .used_types
            .iter()
            .filter(|ty| !self.modules.contains_key(*ty))
            .cloned()
            .collect();
        leaves.sort();
        leaves
    }

    /// Module-to-module instantiation graph. Nodes are added in sorted name
    /// order; each module-typed instance becomes one edge weighted by its
    /// multiplicity.
    pub fn graph(&self) -> DiGraph<Atom, u64> {
        let mut graph = DiGraph::new();
        let mut index = FxHashMap::<Atom, NodeIndex>::default();
        for name in self.module_names() {
            index.insert(name.clone(), graph.add_node(name));
        }
        for (parent, insts) in &self.modules {
            for inst in insts {
                if let Some(&child) = index.get(&inst.ty) {
                    graph.add_edge(index[parent], child, inst.multiplicity);
                }
            }
        }
        graph
    }

    /// Modules that no module instantiates, sorted.
    pub fn roots(&self) -> Vec<Atom> {
        let graph = self.graph();
        graph
            .node_indices()
            .filter(|&n| {
                graph
                    .neighbors_directed(n, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|n| graph[n].clone())
            .collect()
    }

    /// Some module on an instantiation cycle, if there is one.
    pub fn find_cycle(&self) -> Option<Atom> {
        let graph = self.graph();
        petgraph::algo::toposort(&graph, None)
            .err()
            .map(|cycle| graph[cycle.node_id()].clone())
    }

    /// Resolves the start modules and counts leaves below them.
    pub fn count(&self, opts: &Options) -> Result<LeafCount> {
        let roots = self.roots();

        let tops = match &opts.top {
            Some(top) => {
                if !self.is_module(top) {
                    return Err(Error::UnknownTop {
                        top: top.clone(),
                        known: self.module_names().iter().map(|m| m.to_string()).collect(),
                    });
                }
                vec![Atom::from(top.as_str())]
            }
            None if roots.is_empty() => {
                if !self.modules.is_empty() {
                    log::warn!(
                        "no uninstantiated module found; counting from all {} modules",
                        self.modules.len()
                    );
                }
                self.module_names()
            }
            None => roots.clone(),
        };

        if opts.check_cycles {
            if let Some(module) = self.find_cycle() {
                return Err(Error::CyclicHierarchy {
                    module: module.to_string(),
                });
            }
        }

        let breakdown = self.count_leaves(&tops);
        let total = breakdown
            .values()
            .fold(0u64, |acc, &n| acc.saturating_add(n));

        Ok(LeafCount {
            tops,
            roots,
            total,
            breakdown,
        })
    }

    /// Depth-first expansion from each start, multiplying replication along
    /// the path. Does not terminate on a cyclic hierarchy.
    pub fn count_leaves(&self, starts: &[Atom]) -> FxHashMap<Atom, u64> {
        let mut counts = FxHashMap::<Atom, u64>::default();
        for start in starts {
            let mut stack = vec![(start.clone(), 1u64)];
            while let Some((module, scale)) = stack.pop() {
                for inst in self.instantiations(&module) {
                    let n = scale.saturating_mul(inst.multiplicity);
                    if self.modules.contains_key(&inst.ty) {
                        log::trace!("{} -> {} x{}", module, inst.ty, n);
                        stack.push((inst.ty.clone(), n));
                    } else {
                        let count = counts.entry(inst.ty.clone()).or_insert(0);
                        *count = count.saturating_add(n);
                    }
                }
            }
        }
        counts
    }
}
