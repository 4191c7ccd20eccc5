//! Sesión de edición de mantenimiento
//!
//! Máquina de dos estados explícita para editar el registro de servicio de un
//! vehículo: `Viewing` ⇄ `Editing`. Al entrar en edición se toma un snapshot
//! del registro actual; los cambios se aplican solo al borrador y al salir se
//! confirman (`commit`) o se descartan (`discard`).

use crate::models::maintenance::{MaintenanceCategory, MaintenanceLog};

/// Estado de la sesión. En `Editing` el borrador vive dentro de la variante,
/// el registro confirmado queda intacto hasta el commit.
#[derive(Debug, Clone, Copy, PartialEq)]
enum EditorState {
    Viewing,
    Editing { draft: MaintenanceLog },
}

/// Sesión de edición sobre el registro de mantenimiento de un vehículo
#[derive(Debug, Clone)]
pub struct MaintenanceEditor {
    committed: MaintenanceLog,
    state: EditorState,
}

impl MaintenanceEditor {
    pub fn new(log: MaintenanceLog) -> Self {
        Self {
            committed: log,
            state: EditorState::Viewing,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// Registro visible: el borrador durante la edición, el confirmado fuera de ella
    pub fn log(&self) -> &MaintenanceLog {
        match &self.state {
            EditorState::Editing { draft } => draft,
            EditorState::Viewing => &self.committed,
        }
    }

    /// Entrar en edición tomando un snapshot del registro confirmado.
    /// Reentrar estando ya en edición conserva el borrador en curso.
    pub fn enter_edit(&mut self) {
        if let EditorState::Viewing = self.state {
            self.state = EditorState::Editing { draft: self.committed };
        }
    }

    /// Anotar una lectura de servicio en el borrador. Fuera del modo edición
    /// no hay borrador y la anotación se ignora.
    pub fn set_last_change(&mut self, category: MaintenanceCategory, value: Option<f64>) {
        if let EditorState::Editing { draft } = &mut self.state {
            draft.set_last_change(category, value);
        }
    }

    /// Confirmar el borrador como nuevo registro y volver a `Viewing`.
    /// Devuelve el registro resultante; en `Viewing` es un no-op.
    pub fn commit(&mut self) -> MaintenanceLog {
        if let EditorState::Editing { draft } = self.state {
            self.committed = draft;
        }
        self.state = EditorState::Viewing;
        self.committed
    }

    /// Descartar el borrador y volver a `Viewing` con el snapshot intacto
    pub fn discard(&mut self) -> MaintenanceLog {
        self.state = EditorState::Viewing;
        self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_log() -> MaintenanceLog {
        MaintenanceLog {
            oil: Some(10_000.0),
            tires: Some(4_000.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_viewing_with_given_log() {
        let editor = MaintenanceEditor::new(base_log());
        assert!(!editor.is_editing());
        assert_eq!(editor.log().oil, Some(10_000.0));
    }

    #[test]
    fn test_commit_applies_draft() {
        let mut editor = MaintenanceEditor::new(base_log());
        editor.enter_edit();
        editor.set_last_change(MaintenanceCategory::Oil, Some(18_000.0));
        editor.set_last_change(MaintenanceCategory::Brakes, Some(15_000.0));

        let committed = editor.commit();
        assert!(!editor.is_editing());
        assert_eq!(committed.oil, Some(18_000.0));
        assert_eq!(committed.brakes, Some(15_000.0));
        assert_eq!(committed.tires, Some(4_000.0));
    }

    #[test]
    fn test_discard_restores_snapshot() {
        let mut editor = MaintenanceEditor::new(base_log());
        editor.enter_edit();
        editor.set_last_change(MaintenanceCategory::Oil, Some(99_999.0));
        editor.set_last_change(MaintenanceCategory::Tires, None);

        let restored = editor.discard();
        assert!(!editor.is_editing());
        assert_eq!(restored, base_log());
        assert_eq!(*editor.log(), base_log());
    }

    #[test]
    fn test_edits_outside_editing_are_ignored() {
        let mut editor = MaintenanceEditor::new(base_log());
        editor.set_last_change(MaintenanceCategory::Oil, Some(0.0));
        assert_eq!(editor.log().oil, Some(10_000.0));

        // commit/discard en Viewing son no-ops que devuelven el registro actual
        assert_eq!(editor.commit(), base_log());
        assert_eq!(editor.discard(), base_log());
    }

    #[test]
    fn test_reentering_edit_keeps_draft() {
        let mut editor = MaintenanceEditor::new(base_log());
        editor.enter_edit();
        editor.set_last_change(MaintenanceCategory::Battery, Some(7_000.0));
        editor.enter_edit();
        assert_eq!(editor.log().battery, Some(7_000.0));
    }
}
