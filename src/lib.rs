//! Structural component modelling for engineering projects.
//!
//! A project holds a list of typed structural components (beams, columns,
//! footings, load cases). Each component type has a property editor that
//! produces a new property bag on every change and a visualizer that draws a
//! unit-scaled 2D schematic from that bag. Projects carry a settings profile
//! of design codes and unit preferences, and the whole workspace is persisted
//! through an injected [`store::Store`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`kind`] | Closed set of component kinds and the add-component catalog |
//! | [`bag`] | Untyped property bag and lenient field readers |
//! | [`geometry`] | Typed per-kind geometry with defaults and bag conversion |
//! | [`scene`] | Resolution-independent 2D scene and SVG output |
//! | [`visualize`] | Per-kind schematic renderers and the pending placeholder |
//! | [`editor`] | Per-kind field tables, form description, and field edits |
//! | [`registry`] | Validated kind → definition table with a pending fallback |
//! | [`settings`] | Codes, material parameters, units, and the settings draft |
//! | [`project`] | Project/component aggregate and its operations |
//! | [`detail`] | Project detail view state: selection, filter, dialogs, bags |
//! | [`actor`] | Human/bot classification from a user-agent |
//! | [`activity`] | Activity records and the newest-first log |
//! | [`user`] | User profiles and stored accounts |
//! | [`store`] | Persistence port with memory and JSON-file backends |
//! | [`workspace`] | Top-level state: projects, users, activity |

pub mod activity;
pub mod actor;
pub mod bag;
pub mod detail;
pub mod editor;
pub mod geometry;
pub mod kind;
pub mod project;
pub mod registry;
pub mod scene;
pub mod settings;
pub mod store;
pub mod user;
pub mod visualize;
pub mod workspace;
