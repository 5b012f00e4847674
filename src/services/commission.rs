// src/services/commission.rs
//
// Calculateur de revenus reconnus : dérivation pure, recalculée à chaque
// affichage du tableau de bord, jamais persistée.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{
    contrat::{Contrat, StatutContrat},
    dashboard::RevenuMensuel,
};

pub fn annees_ecoulees(date_debut: NaiveDate, aujourd_hui: NaiveDate) -> i32 {
    aujourd_hui.year() - date_debut.year()
}

// Taux première année tant que l'année civile de souscription n'est pas
// passée, taux années suivantes ensuite.
pub fn taux_applicable(contrat: &Contrat, aujourd_hui: NaiveDate) -> Decimal {
    if annees_ecoulees(contrat.date_debut, aujourd_hui) == 0 {
        contrat.commission_premiere_annee
    } else {
        contrat.commission_annees_suivantes
    }
}

pub fn commission_mensuelle(montant_annuel: Decimal, taux: Decimal) -> Decimal {
    montant_annuel * taux / Decimal::from(100) / Decimal::from(12)
}

// Frais récurrents : lissés sur 12 mois chaque année. Frais uniques :
// amortis linéairement sur les années écoulées, sans date de fin — les
// vieux contrats continuent d'en porter une part résiduelle. Comportement
// hérité du logiciel d'origine, conservé tel quel (voir DESIGN.md).
pub fn frais_mensuels(frais_dossier: Decimal, recurrents: bool, annees: i32) -> Decimal {
    if recurrents {
        frais_dossier / Decimal::from(12)
    } else {
        frais_dossier / Decimal::from(12 * annees.max(1))
    }
}

pub fn commission_mensuelle_contrat(contrat: &Contrat, aujourd_hui: NaiveDate) -> Decimal {
    commission_mensuelle(contrat.montant_annuel, taux_applicable(contrat, aujourd_hui))
}

pub fn frais_mensuels_contrat(contrat: &Contrat, aujourd_hui: NaiveDate) -> Decimal {
    frais_mensuels(
        contrat.frais_dossier,
        contrat.frais_recurrents,
        annees_ecoulees(contrat.date_debut, aujourd_hui),
    )
}

fn mois_precedent(annee: i32, mois: u32) -> (i32, u32) {
    if mois == 1 { (annee - 1, 12) } else { (annee, mois - 1) }
}

// Série des 12 derniers mois civils, du plus ancien au plus récent.
// Un mois ne compte que les contrats actifs dont la date de début tombe
// dans ce mois civil — pas tous les contrats en cours ce mois-là. C'est
// le comportement observé du logiciel d'origine, conservé tel quel.
pub fn revenus_mensuels(contrats: &[Contrat], aujourd_hui: NaiveDate) -> Vec<RevenuMensuel> {
    let mut buckets: Vec<(i32, u32)> = Vec::with_capacity(12);
    let (mut annee, mut mois) = (aujourd_hui.year(), aujourd_hui.month());
    for _ in 0..12 {
        buckets.push((annee, mois));
        (annee, mois) = mois_precedent(annee, mois);
    }
    buckets.reverse();

    buckets
        .into_iter()
        .map(|(annee, mois)| {
            let mut commissions = Decimal::ZERO;
            let mut frais = Decimal::ZERO;
            for contrat in contrats {
                if contrat.statut != StatutContrat::Actif {
                    continue;
                }
                if contrat.date_debut.year() != annee || contrat.date_debut.month() != mois {
                    continue;
                }
                commissions += commission_mensuelle_contrat(contrat, aujourd_hui);
                frais += frais_mensuels_contrat(contrat, aujourd_hui);
            }
            RevenuMensuel {
                annee,
                mois,
                commissions,
                frais,
                total: commissions + frais,
            }
        })
        .collect()
}

// Totaux courants du résumé : tous les contrats actifs, quel que soit
// leur mois de souscription.
pub fn totaux_mensuels(contrats: &[Contrat], aujourd_hui: NaiveDate) -> (Decimal, Decimal) {
    let mut commissions = Decimal::ZERO;
    let mut frais = Decimal::ZERO;
    for contrat in contrats {
        if contrat.statut != StatutContrat::Actif {
            continue;
        }
        commissions += commission_mensuelle_contrat(contrat, aujourd_hui);
        frais += frais_mensuels_contrat(contrat, aujourd_hui);
    }
    (commissions, frais)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn contrat(
        date_debut: NaiveDate,
        montant_annuel: i64,
        premiere: i64,
        suivantes: i64,
        frais: i64,
        recurrents: bool,
        statut: StatutContrat,
    ) -> Contrat {
        Contrat {
            id: Uuid::new_v4(),
            contact_id: Uuid::new_v4(),
            partenaire_id: Uuid::new_v4(),
            reference: "CONT-2025_01_0001".to_string(),
            type_risque: None,
            produit: None,
            montant_annuel: Decimal::from(montant_annuel),
            commission_premiere_annee: Decimal::from(premiere),
            commission_annees_suivantes: Decimal::from(suivantes),
            frais_dossier: Decimal::from(frais),
            frais_recurrents: recurrents,
            date_debut,
            date_fin: date_debut + chrono::Duration::days(365),
            statut,
            motif_resiliation: None,
            date_resiliation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(annee: i32, mois: u32, jour: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(annee, mois, jour).unwrap()
    }

    #[test]
    fn commission_premiere_annee_1200_a_30_pourcent() {
        let c = contrat(date(2025, 3, 1), 1200, 30, 10, 0, false, StatutContrat::Actif);
        let mensuelle = commission_mensuelle_contrat(&c, date(2025, 9, 15));
        assert_eq!(mensuelle, Decimal::from(30));
    }

    #[test]
    fn taux_suivant_des_le_changement_d_annee_civile() {
        let c = contrat(date(2024, 11, 1), 1200, 30, 10, 0, false, StatutContrat::Actif);
        // Souscrit en novembre 2024 : dès janvier 2025 le taux de
        // renouvellement s'applique, même avant l'anniversaire.
        let mensuelle = commission_mensuelle_contrat(&c, date(2025, 2, 1));
        assert_eq!(mensuelle, Decimal::from(10));
    }

    #[test]
    fn frais_recurrents_lisses_sur_douze_mois() {
        assert_eq!(frais_mensuels(Decimal::from(120), true, 5), Decimal::from(10));
    }

    #[test]
    fn frais_uniques_amortis_sur_les_annees_ecoulees() {
        // Année de souscription : max(1, 0) protège la division.
        assert_eq!(frais_mensuels(Decimal::from(120), false, 0), Decimal::from(10));
        // Deux ans plus tard : 120 / 24.
        assert_eq!(frais_mensuels(Decimal::from(120), false, 2), Decimal::from(5));
    }

    #[test]
    fn serie_couvre_douze_mois_du_plus_ancien_au_plus_recent() {
        let serie = revenus_mensuels(&[], date(2025, 8, 24));
        assert_eq!(serie.len(), 12);
        assert_eq!((serie[0].annee, serie[0].mois), (2024, 9));
        assert_eq!((serie[11].annee, serie[11].mois), (2025, 8));
        assert!(serie.iter().all(|r| r.total == Decimal::ZERO));
    }

    #[test]
    fn un_contrat_ne_compte_que_dans_son_mois_de_souscription() {
        let c = contrat(date(2025, 5, 10), 1200, 30, 10, 0, false, StatutContrat::Actif);
        let serie = revenus_mensuels(&[c], date(2025, 8, 24));

        let mai = serie.iter().find(|r| r.mois == 5).unwrap();
        assert_eq!(mai.commissions, Decimal::from(30));

        for r in serie.iter().filter(|r| r.mois != 5) {
            assert_eq!(r.commissions, Decimal::ZERO);
        }
    }

    #[test]
    fn contrat_hors_fenetre_ou_resilie_ignore() {
        let vieux = contrat(date(2024, 6, 1), 1200, 30, 10, 0, false, StatutContrat::Actif);
        let resilie = contrat(date(2025, 7, 1), 1200, 30, 10, 0, false, StatutContrat::Resilie);
        let serie = revenus_mensuels(&[vieux, resilie], date(2025, 8, 24));
        assert!(serie.iter().all(|r| r.total == Decimal::ZERO));
    }

    #[test]
    fn totaux_additionnent_tous_les_contrats_actifs() {
        let a = contrat(date(2025, 2, 1), 1200, 30, 10, 120, true, StatutContrat::Actif);
        let b = contrat(date(2023, 2, 1), 2400, 20, 5, 0, false, StatutContrat::Actif);
        let (commissions, frais) = totaux_mensuels(&[a, b], date(2025, 8, 24));
        // a : 1200*30%/12 = 30 ; b : 2400*5%/12 = 10.
        assert_eq!(commissions, Decimal::from(40));
        assert_eq!(frais, Decimal::from(10));
    }
}
