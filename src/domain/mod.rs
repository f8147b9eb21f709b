pub mod builder;
pub mod extract;
pub mod normalize;
pub mod optimize;
pub mod polyhedron;
pub mod solver;
pub mod solver_factory;
pub mod solvers;
