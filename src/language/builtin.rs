//! Language profiles shipped with the crate.
//!
//! Keep user-facing templates here so they stay in one place and are easy to
//! update or translate.

use super::{Keywords, LanguageProfile, Messages};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn english() -> LanguageProfile {
    LanguageProfile {
        keywords: Keywords {
            add: strings(&["add", "buy", "get"]),
            remove: strings(&["remove", "delete"]),
            search: strings(&["search", "find", "look for"]),
        },
        fillers: strings(&[
            "to my shopping list",
            "to my list",
            "to the list",
            "from my shopping list",
            "from my list",
            "from the list",
            "please",
        ]),
        price_below: strings(&["under", "below", "less than", "cheaper than"]),
        messages: Messages {
            added: "Added {quantity} × {item} to your list".into(),
            removed: "Removed {item} from your list".into(),
            increased: "Increased {item} by {quantity}, total now {total}".into(),
            decreased: "Decreased {item} by {quantity}, total now {total}".into(),
            not_found: "{item} not found in your list".into(),
            found: "Found {count} items matching your search".into(),
            help: "Say 'Add milk' or 'Remove bread' to manage your list".into(),
            substitute_for: "You could use {item} as a substitute".into(),
        },
    }
}

pub(super) fn spanish() -> LanguageProfile {
    LanguageProfile {
        keywords: Keywords {
            add: strings(&["agregar", "comprar", "obtener"]),
            remove: strings(&["eliminar", "quitar", "borrar"]),
            search: strings(&["buscar", "encontrar"]),
        },
        fillers: strings(&["a mi lista", "a la lista", "de mi lista", "de la lista", "por favor"]),
        price_below: strings(&["menos de", "por debajo de"]),
        messages: Messages {
            added: "Agregado {quantity} × {item} a tu lista".into(),
            removed: "Eliminado {item} de tu lista".into(),
            increased: "Aumentado {item} por {quantity}, total ahora {total}".into(),
            decreased: "Disminuido {item} por {quantity}, total ahora {total}".into(),
            not_found: "{item} no se encuentra en tu lista".into(),
            found: "Encontrados {count} artículos coincidentes".into(),
            help: "Di 'Agregar leche' o 'Eliminar pan' para administrar tu lista".into(),
            substitute_for: "Puedes usar {item} como sustituto".into(),
        },
    }
}

pub(super) fn french() -> LanguageProfile {
    LanguageProfile {
        keywords: Keywords {
            add: strings(&["ajouter", "acheter", "obtenir"]),
            remove: strings(&["supprimer", "retirer", "effacer"]),
            search: strings(&["chercher", "trouver", "rechercher"]),
        },
        fillers: strings(&[
            "à ma liste",
            "à la liste",
            "de ma liste",
            "de la liste",
            "s'il vous plaît",
            "s'il te plaît",
        ]),
        price_below: strings(&["moins de", "en dessous de"]),
        messages: Messages {
            added: "Ajouté {quantity} × {item} à votre liste".into(),
            removed: "Supprimé {item} de votre liste".into(),
            increased: "Augmenté {item} de {quantity}, total maintenant {total}".into(),
            decreased: "Diminué {item} de {quantity}, total maintenant {total}".into(),
            not_found: "{item} introuvable dans votre liste".into(),
            found: "{count} articles trouvés correspondant à la recherche".into(),
            help: "Dites 'Ajouter lait' ou 'Supprimer pain' pour gérer votre liste".into(),
            substitute_for: "Vous pouvez utiliser {item} comme substitut".into(),
        },
    }
}

pub(super) fn hindi() -> LanguageProfile {
    LanguageProfile {
        keywords: Keywords {
            add: strings(&["जोड़ें", "खरीदें"]),
            remove: strings(&["हटाएं", "निकालें"]),
            search: strings(&["खोजें", "ढूंढें"]),
        },
        fillers: strings(&["मेरी सूची में", "सूची में", "मेरी सूची से", "सूची से", "कृपया"]),
        price_below: strings(&["से कम", "से सस्ता"]),
        messages: Messages {
            added: "{quantity} × {item} आपकी सूची में जोड़ा गया".into(),
            removed: "{item} आपकी सूची से हटा दिया गया".into(),
            increased: "{item} को {quantity} से बढ़ाया, कुल अब {total}".into(),
            decreased: "{item} को {quantity} से घटाया, कुल अब {total}".into(),
            not_found: "{item} आपकी सूची में नहीं है".into(),
            found: "{count} आइटम खोज में मिले".into(),
            help: "'दूध जोड़ें' या 'ब्रेड हटाएं' कहकर अपनी सूची प्रबंधित करें".into(),
            substitute_for: "{item} के रूप में आप इसे उपयोग कर सकते हैं".into(),
        },
    }
}
