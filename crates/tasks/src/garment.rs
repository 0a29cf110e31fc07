//! The garment-simulation research sweep.
//!
//! Covers programmatic pattern design, physics-based cloth modeling,
//! collision handling, neural methods, real-time trade-offs, and material
//! realism. The query window and item cap are substituted into the
//! directive at run time; the model is held to them by instruction, not by
//! post-hoc enforcement.

use scout_core::task::{QueryWindow, ResearchTask};

const SYSTEM_INSTRUCTION: &str = r#"
You are an elite Technical Research Analyst. Your role is to provide high-density, actionable intelligence summaries based on specific user directives.

CORE OPERATING RULES:
1.  **Strict Constraint Adherence:** If the user specifies a time window (e.g., "last 1 month") or a quantity limit (e.g., "max 10 items"), you must adhere to it with zero deviations. Older or excess items are considered failures.
2.  **No Meta-Commentary:** Do not describe your search process, planning phase, or internal monologue. Do not say "I will now search for..." or "Here is the report." just provide the report.
3.  **Format Compliance:** Follow the requested output structure exactly. If the user asks for a list, give a list. If they ask for specific headers, use those headers.
4.  **Objective Tone:** Maintain a professional, technical, and concise tone. Avoid marketing fluff or enthusiastic adjectives.
5.  **Source Integrity:** Every claim or item must have a clear source or reference.

Your goal is to save the user time by filtering out noise and delivering only the most relevant signal.
"#;

/// The garment research task: fixed query, fixed instruction.
pub struct GarmentResearchTask {
    lookback_days: u32,
    max_items: usize,
}

impl GarmentResearchTask {
    pub fn new(lookback_days: u32, max_items: usize) -> Self {
        Self {
            lookback_days,
            max_items,
        }
    }
}

impl ResearchTask for GarmentResearchTask {
    fn name(&self) -> &str {
        "garment-research"
    }

    fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    fn max_items(&self) -> usize {
        self.max_items
    }

    fn build_system_instruction(&self) -> String {
        SYSTEM_INSTRUCTION.trim().to_string()
    }

    fn build_query(&self, window: &QueryWindow) -> String {
        let start_date = window.start_str();
        let today_date = window.end_str();
        let max_items = self.max_items;

        format!(
            r#"
# Research Directive: Garment Simulation & Computational Fashion

**Objective:** Conduct a targeted research sweep for the latest advancements in computer graphics, computational physics, and programmatic design related to simulating clothing on virtual human avatars.

## 1. Constraints & Scope (Strict Adherence Required)
*   **Timeframe:** Focus **STRICTLY** on research, codebases, and technical articles published or released between **{start_date}** and **{today_date}**.
*   **Quantity:** Curate a maximum of **{max_items} distinct items**.
*   **Ranking:** Order items by direct relevance to the *Target Research Domains* below (most impactful first).
*   **Context:** Do not include older research unless absolutely necessary for foundational context (clearly labeled as "Background").

## 2. Target Research Domains

### A. Programmatic Pattern Design & "Garment-Code"
*   **Sewing Pattern Languages:** Frameworks treating garments as code (e.g., similar to *GarmentCode*). Usage of parametric design for massive dataset generation.
*   **2D-to-3D Logic:** Algorithms solving the assembly of 2D flat patterns onto 3D bodies (seaming forces, topology).
*   **Inverse Design:** Optimization techniques to derive 2D pattern parameters from target 3D shapes/fits.

### B. Physics-Based Modeling
*   **Solver Comparison:** Advances in Mass-Spring, FEM (Finite Element Method), and PBD (Position-Based Dynamics).
*   **Performance:** New trade-offs discovered between physical accuracy, stability, and computational cost.

### C. Collision Handling
*   **Robustness:** Novel techniques for self-collision and cloth-body interaction.
*   **High-Velocity:** Solutions for "tunneling" artifacts in fast-motion scenarios.

### D. AI & Data-Driven Methods
*   **Neural Physics:** Neural Cloth Simulation, Graph Neural Networks (GNNs), and neural surrogates replacing traditional solvers.
*   **Datasets:** New or updated datasets for training (e.g., successors or expansions to CLOTH3D).

### E. Real-Time vs. High-Fidelity
*   **VTON:** Specific requirements for Virtual Try-On in e-commerce vs. offline VFX.
*   **Consumer Hardware:** Optimization for mobile/web real-time simulation.

### F. Material Realism
*   **Complex Behaviors:** Modeling anisotropy, hysteresis, and specific fabrics (silk, denim).
*   **Parameter Estimation:** Capturing digital material parameters from physical world data.

## 3. Deliverable Requirements
Provide a detailed synthesis of the gathered intelligence. For each of the top {max_items} items, include:
*   **Title & Source:** (Link/Citation)
*   **Relevance:** Which domain (A-F) it impacts and why.
*   **Key Innovation:** What specific problem does it solve?
"#
        )
        .trim()
        .to_string()
    }
}
