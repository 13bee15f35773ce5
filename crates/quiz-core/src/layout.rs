//! Estructura del documento del quiz.
//!
//! `QuizLayout` describe las cuatro secciones (selector de género, rama
//! masculina, rama femenina y contacto), las sub-secciones por tipo de
//! cuerpo y los campos de cada paso. Es inmutable una vez construido; el
//! `BranchResolver` y el controlador sólo lo consultan.
use std::collections::HashMap;

use indexmap::IndexMap;

use crate::errors::QuizError;
use crate::model::{FieldKind, FieldLocator, FieldSpec, QuizPath, SectionId, StepId, StepSpec};

/// Campos que alimentan el motor de recomendación de una rama.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationInputs {
    pub current: FieldLocator,
    pub goal: FieldLocator,
}

/// Sección de una rama: pasos directos y sub-secciones por tipo de cuerpo.
#[derive(Debug, Clone, Default)]
pub struct PathSection {
    pub steps: Vec<StepId>,
    pub body_types: IndexMap<String, Vec<StepId>>,
}

impl PathSection {
    /// Todos los pasos de la sección en orden de documento (incluye los de
    /// las sub-secciones, igual que una consulta sobre el contenedor).
    pub fn all_steps(&self) -> Vec<StepId> {
        let mut out = self.steps.clone();
        for steps in self.body_types.values() {
            out.extend(steps.iter().cloned());
        }
        out
    }
}

#[derive(Debug, Clone)]
struct FieldEntry {
    step: StepId,
    spec: FieldSpec,
}

#[derive(Debug, Clone)]
pub struct QuizLayout {
    steps: IndexMap<StepId, StepSpec>,
    fields: IndexMap<FieldLocator, FieldEntry>,
    gender_selector: Vec<StepId>,
    male: PathSection,
    female: PathSection,
    contact: Vec<StepId>,
    recommendation_inputs: HashMap<QuizPath, RecommendationInputs>,
}

impl QuizLayout {
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::default()
    }

    pub fn step(&self, id: &StepId) -> Option<&StepSpec> {
        self.steps.get(id)
    }

    /// Todos los pasos en orden de documento.
    pub fn steps(&self) -> impl Iterator<Item = &StepSpec> {
        self.steps.values()
    }

    /// Paso dueño y especificación de un campo.
    pub fn field(&self, locator: &FieldLocator) -> Option<(&StepId, &FieldSpec)> {
        self.fields.get(locator).map(|e| (&e.step, &e.spec))
    }

    /// Todos los campos en orden de documento.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldLocator, &FieldSpec)> {
        self.fields.iter().map(|(loc, e)| (loc, &e.spec))
    }

    pub fn step_fields(&self, id: &StepId) -> Vec<FieldLocator> {
        self.steps
            .get(id)
            .map(|s| s.fields.iter().map(FieldSpec::locator).collect())
            .unwrap_or_default()
    }

    pub fn gender_selector(&self) -> &[StepId] {
        &self.gender_selector
    }

    pub fn path(&self, path: QuizPath) -> &PathSection {
        match path {
            QuizPath::Male => &self.male,
            QuizPath::Female => &self.female,
        }
    }

    pub fn body_type_steps(&self, path: QuizPath, body_type: &str) -> Option<&[StepId]> {
        self.path(path).body_types.get(body_type).map(|v| v.as_slice())
    }

    pub fn contact(&self) -> &[StepId] {
        &self.contact
    }

    /// Pasos directos de una sección (las ramas incluyen sus sub-secciones).
    pub fn section_steps(&self, section: SectionId) -> Vec<StepId> {
        match section {
            SectionId::GenderSelector => self.gender_selector.clone(),
            SectionId::Male => self.male.all_steps(),
            SectionId::Female => self.female.all_steps(),
            SectionId::Contact => self.contact.clone(),
        }
    }

    pub fn recommendation_inputs(&self, path: QuizPath) -> Option<&RecommendationInputs> {
        self.recommendation_inputs.get(&path)
    }

    /// Rama cuyo cálculo de recomendación depende de `locator`.
    pub fn recommendation_path_for(&self, locator: &FieldLocator) -> Option<QuizPath> {
        [QuizPath::Male, QuizPath::Female].into_iter().find(|p| {
                                                          self.recommendation_inputs
                                                              .get(p)
                                                              .is_some_and(|i| &i.current == locator || &i.goal == locator)
                                                      })
    }

    /// Comprueba la coherencia de referencias cruzadas: el selector no
    /// puede quedar vacío y las entradas de recomendación deben existir.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.gender_selector.is_empty() {
            return Err(QuizError::EmptySection("genderSelector".into()));
        }
        for inputs in self.recommendation_inputs.values() {
            for loc in [&inputs.current, &inputs.goal] {
                if !self.fields.contains_key(loc) {
                    return Err(QuizError::UnknownField(loc.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Radios que comparten grupo (`name`) con `locator`, incluido él mismo.
    pub fn radio_group(&self, locator: &FieldLocator) -> Vec<FieldLocator> {
        let Some(entry) = self.fields.get(locator) else {
            return Vec::new();
        };
        match (&entry.spec.kind, &entry.spec.name) {
            (FieldKind::Radio, Some(name)) => self.fields
                                                                .iter()
                                                                .filter(|(_, e)| {
                                                                    e.spec.kind == FieldKind::Radio
                                                                    && e.spec.name.as_ref() == Some(name)
                                                                })
                                                                .map(|(l, _)| l.clone())
                                                                .collect(),
            _ => vec![locator.clone()],
        }
    }
}

/// Builder del layout. Los pasos se registran por sección y se validan al
/// construir (ids únicos, localizadores únicos, selector no vacío).
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    gender_selector: Vec<StepSpec>,
    male: Vec<StepSpec>,
    female: Vec<StepSpec>,
    male_branches: IndexMap<String, Vec<StepSpec>>,
    female_branches: IndexMap<String, Vec<StepSpec>>,
    contact: Vec<StepSpec>,
    recommendation_inputs: HashMap<QuizPath, RecommendationInputs>,
}

impl LayoutBuilder {
    pub fn gender_step(mut self, step: StepSpec) -> Self {
        self.gender_selector.push(step);
        self
    }

    pub fn path_step(mut self, path: QuizPath, step: StepSpec) -> Self {
        match path {
            QuizPath::Male => self.male.push(step),
            QuizPath::Female => self.female.push(step),
        }
        self
    }

    pub fn body_type_step(mut self, path: QuizPath, body_type: impl Into<String>, step: StepSpec) -> Self {
        let branches = match path {
            QuizPath::Male => &mut self.male_branches,
            QuizPath::Female => &mut self.female_branches,
        };
        branches.entry(body_type.into()).or_default().push(step);
        self
    }

    /// Declara una sub-sección sin pasos (el resolver no la usará para
    /// acotar la secuencia).
    pub fn empty_body_type(mut self, path: QuizPath, body_type: impl Into<String>) -> Self {
        let branches = match path {
            QuizPath::Male => &mut self.male_branches,
            QuizPath::Female => &mut self.female_branches,
        };
        branches.entry(body_type.into()).or_default();
        self
    }

    pub fn contact_step(mut self, step: StepSpec) -> Self {
        self.contact.push(step);
        self
    }

    pub fn recommendation_inputs(mut self,
                                 path: QuizPath,
                                 current: impl Into<FieldLocator>,
                                 goal: impl Into<FieldLocator>)
                                 -> Self {
        self.recommendation_inputs.insert(path,
                                          RecommendationInputs { current: current.into(),
                                                                 goal: goal.into() });
        self
    }

    pub fn build(self) -> Result<QuizLayout, QuizError> {
        if self.gender_selector.is_empty() {
            return Err(QuizError::EmptySection("genderSelector".into()));
        }
        let mut layout = QuizLayout { steps: IndexMap::new(),
                                      fields: IndexMap::new(),
                                      gender_selector: Vec::new(),
                                      male: PathSection::default(),
                                      female: PathSection::default(),
                                      contact: Vec::new(),
                                      recommendation_inputs: self.recommendation_inputs };

        layout.gender_selector = register(&mut layout, self.gender_selector)?;
        layout.male.steps = register(&mut layout, self.male)?;
        for (name, steps) in self.male_branches {
            let ids = register(&mut layout, steps)?;
            layout.male.body_types.insert(name, ids);
        }
        layout.female.steps = register(&mut layout, self.female)?;
        for (name, steps) in self.female_branches {
            let ids = register(&mut layout, steps)?;
            layout.female.body_types.insert(name, ids);
        }
        layout.contact = register(&mut layout, self.contact)?;
        layout.validate()?;
        Ok(layout)
    }
}

fn register(layout: &mut QuizLayout, steps: Vec<StepSpec>) -> Result<Vec<StepId>, QuizError> {
    let mut ids = Vec::with_capacity(steps.len());
    for step in steps {
        if layout.steps.contains_key(&step.id) {
            return Err(QuizError::DuplicateStep(step.id.to_string()));
        }
        for field in &step.fields {
            let locator = field.locator();
            if layout.fields.contains_key(&locator) {
                return Err(QuizError::DuplicateField(locator.to_string()));
            }
            layout.fields.insert(locator,
                                 FieldEntry { step: step.id.clone(),
                                              spec: field.clone() });
        }
        ids.push(step.id.clone());
        layout.steps.insert(step.id.clone(), step);
    }
    Ok(ids)
}
