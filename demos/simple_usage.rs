/// Simple example demonstrating how to use the response fixer library

use anyhow::Result;
use response_fixer::fix_file;
use std::path::Path;

fn main() -> Result<()> {
    // Path to a handler file to migrate
    let file_path = "demos/sample_handler.go";

    // Create a sample handler file with old-style calls
    std::fs::write(
        file_path,
        r#"package handler

import (
	"net/http"

	"github.com/gin-gonic/gin"
)

func GetCustomer(c *gin.Context) {
	result, err := usecase.GetCustomer(c, c.Param("id"))
	if err != nil {
		response.Error(c, http.StatusNotFound, "customer not found", err.Error())
		return
	}

	response.Success(c, http.StatusOK, "customer retrieved", result)
}
"#,
    )?;

    println!("Migrating file: {}", file_path);

    // Migrate the file in place
    let outcome = fix_file(Path::new(file_path))?;

    // Display the outcome
    println!("\nChanged: {}", outcome.changed);
    println!("Import added: {}", outcome.import_added);
    println!("Substitutions: {}", outcome.total_replacements());
    for (rule, count) in &outcome.replacements {
        if *count > 0 {
            println!("  - {}: {}", rule, count);
        }
    }

    // Show the migrated source
    let migrated = std::fs::read_to_string(file_path)?;
    println!("\n{}", migrated);

    Ok(())
}
