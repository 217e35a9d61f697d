use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopicTemplate {
    pub title: &'static str,
    pub difficulty: &'static str,
    pub keywords: &'static [&'static str],
    pub description: &'static str,
}

pub const TOPIC_CATALOG: &[TopicTemplate] = &[
    TopicTemplate {
        title: "Moduli spaces in algebraic geometry",
        difficulty: "advanced",
        keywords: &["algebraic geometry", "moduli space", "variety"],
        description: "Study moduli spaces of algebraic varieties and their properties",
    },
    TopicTemplate {
        title: "Numerical methods for partial differential equations",
        difficulty: "intermediate",
        keywords: &["partial differential equations", "numerical analysis", "finite element"],
        description: "Develop new numerical methods for nonlinear partial differential equations",
    },
    TopicTemplate {
        title: "Coloring problems in graph theory",
        difficulty: "intermediate",
        keywords: &["graph theory", "coloring", "combinatorics"],
        description: "Chromatic numbers and coloring algorithms for special graph classes",
    },
    TopicTemplate {
        title: "Limit theorems for stochastic processes",
        difficulty: "advanced",
        keywords: &["probability", "stochastic processes", "limit theorems"],
        description: "Establish new convergence theorems for stochastic processes",
    },
    TopicTemplate {
        title: "Homotopy theory of topological spaces",
        difficulty: "advanced",
        keywords: &["topology", "homotopy", "algebraic topology"],
        description: "Homotopy equivalence and homotopy groups of topological spaces",
    },
    TopicTemplate {
        title: "Distribution of primes in number theory",
        difficulty: "intermediate",
        keywords: &["number theory", "primes", "analytic number theory"],
        description: "How primes are distributed within special sets of integers",
    },
    TopicTemplate {
        title: "Operator theory in functional analysis",
        difficulty: "advanced",
        keywords: &["functional analysis", "operators", "spectral theory"],
        description: "Spectral properties of operators on Banach spaces",
    },
    TopicTemplate {
        title: "Algorithm design for combinatorial optimization",
        difficulty: "intermediate",
        keywords: &["combinatorial optimization", "algorithms", "complexity"],
        description: "Approximation algorithms for NP-hard problems",
    },
];
