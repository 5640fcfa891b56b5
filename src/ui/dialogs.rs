use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

fn confirm(title: &str, description: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

pub fn confirm_sign_out() -> bool {
    confirm(
        "Sair do Sistema",
        "Tem certeza que deseja sair? Você precisará fazer login novamente para acessar o sistema.",
    )
}

pub fn confirm_discard_changes() -> bool {
    confirm(
        "Descartar alterações",
        "Existem alterações não salvas neste paciente. Deseja descartá-las?",
    )
}

pub fn choose_export_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name("pacientes.csv")
        .save_file()
}
